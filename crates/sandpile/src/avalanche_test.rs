//! Regression tests: literal piles produced by scripted drop sequences.
//!
//! The expected grids include the stale-height outcomes (a cell giving a
//! grain to every neighbor it out-tops in one dequeue, negative heights).

use crate::pile::Pile;

/// Helper: drop at each cell in turn, collecting the fall counts.
fn drop_all(pile: &mut Pile, cells: &[(i64, i64)]) -> Vec<u64> {
    cells
        .iter()
        .map(|&(x, y)| pile.drop_at(x, y).unwrap())
        .collect()
}

/// Helper: print the pile for debugging.
fn dump(label: &str, pile: &Pile) {
    eprintln!("--- {label} ---\n{pile}");
}

#[test]
fn repeated_center_drops_on_small_pile() {
    let mut pile = Pile::new(3, 3, 1).unwrap();
    let falls = drop_all(&mut pile, &[(1, 1); 6]);
    dump("3x3 threshold 1", &pile);

    assert_eq!(falls, vec![0, 6, 0, 2, 0, 0]);
    assert_eq!(pile.to_rows(), vec![vec![0, 1, 0], vec![1, 2, 1], vec![0, 1, 0]]);
    assert_eq!(pile.total_grains(), 6);
}

#[test]
fn second_center_drop_settles_off_center() {
    let mut pile = Pile::new(3, 3, 1).unwrap();
    assert_eq!(drop_all(&mut pile, &[(1, 1), (1, 1)]), vec![0, 6]);
    assert_eq!(pile.to_rows(), vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 1, 0]]);
    assert_eq!(pile.cascade(1, 1), Ok(0));
}

#[test]
fn avalanche_leaves_negative_cell() {
    let mut pile = Pile::new(5, 5, 1).unwrap();
    let falls = drop_all(&mut pile, &[(2, 2); 8]);
    dump("5x5 threshold 1", &pile);

    assert_eq!(falls, vec![0, 6, 0, 2, 0, 0, 17, 5]);
    assert_eq!(
        pile.to_rows(),
        vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, -1, 1, 0],
            vec![1, 1, 0, 1, 1],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 1, 0, 0],
        ]
    );
    assert_eq!(pile.total_grains(), 8);
}

#[test]
fn higher_threshold_builds_taller_center() {
    let mut pile = Pile::new(5, 5, 2).unwrap();
    let falls = drop_all(&mut pile, &[(2, 2); 10]);

    assert_eq!(falls, vec![0, 0, 4, 0, 0, 0, 0, 4, 0, 0]);
    assert_eq!(
        pile.to_rows(),
        vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 2, 0, 0],
            vec![0, 2, 2, 2, 0],
            vec![0, 0, 2, 0, 0],
            vec![0, 0, 0, 0, 0],
        ]
    );
}

#[test]
fn mixed_drop_sequence() {
    let cells = [
        (0, 0),
        (1, 1),
        (1, 1),
        (2, 1),
        (1, 1),
        (1, 2),
        (1, 1),
        (3, 3),
        (1, 1),
        (2, 2),
        (1, 1),
        (1, 1),
        (2, 1),
        (1, 2),
    ];
    let mut pile = Pile::new(4, 4, 1).unwrap();
    let falls = drop_all(&mut pile, &cells);
    dump("4x4 mixed", &pile);

    assert_eq!(falls, vec![0, 0, 6, 6, 0, 2, 6, 0, 0, 2, 2, 0, 2, 0]);
    assert_eq!(
        pile.to_rows(),
        vec![
            vec![1, 1, 1, 0],
            vec![1, 1, 2, 1],
            vec![1, 0, 1, 1],
            vec![0, 1, 1, 1],
        ]
    );
    assert_eq!(pile.total_grains(), cells.len() as i64);
}
