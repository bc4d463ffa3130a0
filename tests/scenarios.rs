use chesscore::apply::play_moves;
use chesscore::{Color, GameResult, Move, Position};

#[test]
fn fools_mate() {
    let before = play_moves(&Position::initial(), &["f2f3", "e7e5", "g2g4"]).expect("legal opening");
    assert_eq!(before.result(), GameResult::Ongoing);

    let mate = before.after_move(&"d8h4".parse().unwrap()).expect("Qh4 is legal");
    assert_eq!(mate.result(), GameResult::BlackWins);
    assert_eq!(mate.turn(), Color::White);
    assert!(mate.in_check());
    assert!(mate.legal_moves().is_empty());
}

#[test]
fn reverse_fools_mate() {
    let p = play_moves(&Position::initial(), &["e2e4", "f7f6", "e4e5", "g7g5", "d1h5"]).expect("legal game");
    assert_eq!(p.result(), GameResult::WhiteWins);
    assert!(p.in_check());
}

#[test]
fn no_moves_after_the_game_ends() {
    let mate = play_moves(&Position::initial(), &["f2f3", "e7e5", "g2g4", "d8h4"]).unwrap();
    assert!(mate.legal_moves().is_empty());
    assert!(mate.legal_destinations("e1".parse().unwrap()).is_empty());
    let any: Move = "a2a3".parse().unwrap();
    assert!(!mate.can_move(&any));
    assert_eq!(mate.after_move(&any), None);
}

#[test]
fn scholars_mate() {
    let p = play_moves(
        &Position::initial(),
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    )
    .unwrap();
    assert_eq!(p.result(), GameResult::WhiteWins);
}

#[test]
fn stalemate_by_queen() {
    let p = Position::from_fen("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1").unwrap();
    let next = p.after_move(&"g1g6".parse().unwrap()).expect("Qg6 is legal");
    assert_eq!(next.result(), GameResult::Stalemate);
    assert!(!next.in_check());
    assert!(next.legal_moves().is_empty());
}

#[test]
fn check_that_is_not_mate_keeps_the_game_going() {
    let p = play_moves(&Position::initial(), &["e2e4", "f7f6", "d1h5"]).unwrap();
    assert!(p.in_check());
    assert_eq!(p.result(), GameResult::Ongoing);
    assert!(p.can_move(&"g7g6".parse().unwrap()));
}
