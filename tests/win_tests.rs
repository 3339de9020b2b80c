//! Win detection tests

use connect_four::core::{check_win, is_valid_step, Axis, Grid};
use connect_four::types::{Color, Piece};

fn grid_with(cells: &[(usize, Color)]) -> Grid {
    let mut grid = Grid::new();
    for &(index, color) in cells {
        assert!(grid.set(index, Some(Piece::new(color))));
    }
    grid
}

#[test]
fn test_flat_run_does_not_wrap_rows() {
    // 4,5,6 on row 0 and 7 on row 1 are consecutive indices but not a line.
    let grid = grid_with(&[
        (4, Color::Red),
        (5, Color::Red),
        (6, Color::Red),
        (7, Color::Red),
    ]);
    for i in [4, 5, 6, 7] {
        assert_eq!(check_win(&grid, i), None, "false win through {}", i);
    }
    assert!(!is_valid_step(6, 7, Axis::Flat));
}

#[test]
fn test_flat_win_on_bottom_row() {
    let grid = grid_with(&[
        (36, Color::Blue),
        (37, Color::Blue),
        (38, Color::Blue),
        (39, Color::Blue),
    ]);
    let win = check_win(&grid, 37).expect("flat win");
    assert_eq!(win.color, Color::Blue);
    assert_eq!(win.axis, Axis::Flat);
    assert_eq!(win.cells, [36, 37, 38, 39]);
}

#[test]
fn test_vertical_win() {
    let grid = grid_with(&[
        (17, Color::Red),
        (24, Color::Red),
        (31, Color::Red),
        (38, Color::Red),
    ]);
    let win = check_win(&grid, 17).expect("vertical win");
    assert_eq!(win.axis, Axis::Vert);
    assert_eq!(win.cells, [17, 24, 31, 38]);
}

#[test]
fn test_neg_diagonal_win() {
    // Down-right: stride 8.
    let grid = grid_with(&[
        (14, Color::Blue),
        (22, Color::Blue),
        (30, Color::Blue),
        (38, Color::Blue),
    ]);
    let win = check_win(&grid, 30).expect("diagonal win");
    assert_eq!(win.axis, Axis::Neg);
    assert_eq!(win.cells, [14, 22, 30, 38]);
}

#[test]
fn test_pos_diagonal_win() {
    // Down-left: stride 6.
    let grid = grid_with(&[
        (20, Color::Red),
        (26, Color::Red),
        (32, Color::Red),
        (38, Color::Red),
    ]);
    let win = check_win(&grid, 20).expect("diagonal win");
    assert_eq!(win.axis, Axis::Pos);
    assert_eq!(win.color, Color::Red);
}

#[test]
fn test_diagonal_does_not_wrap_columns() {
    // Stride 6 from 7 (row 1, column 0) lands on 13 (row 1, column 6).
    let grid = grid_with(&[
        (1, Color::Red),
        (7, Color::Red),
        (13, Color::Red),
        (19, Color::Red),
    ]);
    for i in [1, 7, 13, 19] {
        assert_eq!(check_win(&grid, i), None, "false win through {}", i);
    }
    assert!(is_valid_step(1, 7, Axis::Pos));
    assert!(!is_valid_step(7, 13, Axis::Pos));
}

#[test]
fn test_three_is_not_a_win() {
    let grid = grid_with(&[(38, Color::Red), (39, Color::Red), (40, Color::Red)]);
    assert_eq!(check_win(&grid, 39), None);
}

#[test]
fn test_opponent_piece_breaks_run() {
    let grid = grid_with(&[
        (35, Color::Red),
        (36, Color::Red),
        (37, Color::Blue),
        (38, Color::Red),
        (39, Color::Red),
        (40, Color::Red),
    ]);
    assert_eq!(check_win(&grid, 38), None);
}

#[test]
fn test_empty_cell_is_not_a_win() {
    assert_eq!(check_win(&Grid::new(), 38), None);
}
