use chess_rules::{
    game::{CastleSide, MoveOutcome},
    Color, Game, MoveError, PieceKind, Position,
};
use pretty_assertions::assert_eq;

fn pos(s: &str) -> Position {
    s.parse().unwrap()
}

/// Plays every game in `tests/cases/`. Each file lists one move per line as two squares
/// (`E2 E4`), and a `result:` line naming how the game has to end.
#[test]
fn tester() -> std::io::Result<()> {
    for entry in std::fs::read_dir("./tests/cases/")? {
        let entry = entry?;

        if !entry.file_type()?.is_file() {
            continue;
        }

        let content = std::fs::read_to_string(entry.path())?;
        let name = entry.path().display().to_string();

        let mut result = None;
        let mut game = Game::new();
        let mut before = None::<Game>;
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(value) = line.strip_prefix("result:") {
                result = Some(value.trim().to_owned());
                continue;
            }

            let (from, to) = line
                .split_once(' ')
                .unwrap_or_else(|| panic!("{name}: malformed move \"{line}\""));
            if let Some(before) = before {
                assert!(!before.check_outcome().is_final(), "{name}: game ended early");
            }
            if let Err(e) = game.try_make_move(pos(from), pos(to)) {
                panic!("{name}: {from} {to} was refused: {e}");
            }
            before = Some(game.clone());
        }

        match result.as_deref() {
            Some("white-win") => {
                assert_eq!(game.check_outcome(), MoveOutcome::Checkmate(Color::Black), "{name}")
            }
            Some("black-win") => {
                assert_eq!(game.check_outcome(), MoveOutcome::Checkmate(Color::White), "{name}")
            }
            Some("none") => assert_eq!(game.check_outcome(), MoveOutcome::None, "{name}"),
            Some("unknown") | None => {}
            Some(x) => panic!("{name}: invalid value for result: \"{x}\""),
        }
        assert!(game.is_active() != game.check_outcome().is_final());
    }

    Ok(())
}

#[test]
fn opening_move_passes_the_turn() {
    let mut game = Game::new();
    assert!(game.make_move(pos("E2"), pos("E4")));
    assert_eq!(game.player_to_move(), Color::Black);
}

#[test]
fn black_may_not_open() {
    let mut game = Game::new();
    assert!(!game.make_move(pos("E7"), pos("E5")));
    assert_eq!(game, Game::new());
}

#[test]
fn rook_on_open_file_gives_check() {
    let game: Game = "4r3/8/8/8/8/8/8/k3K3 w - - 0 1".parse().unwrap();
    assert!(game.is_check(Color::White));
    assert!(!game.is_check(Color::Black));
}

#[test]
fn king_side_castling_moves_both_pieces() {
    let mut game: Game = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();
    let info = game.try_make_move(pos("E1"), pos("G1")).unwrap();
    assert_eq!(info.castled, Some(CastleSide::King));

    let board = game.board();
    assert!(board.piece_at(pos("G1")).is_some_and(|p| p.is_king()));
    assert!(board.piece_at(pos("F1")).is_some_and(|p| p.is_rook()));
    assert_eq!(board.piece_at(pos("H1")), None);
    assert_eq!(board.piece_at(pos("E1")), None);
}

#[test]
fn castling_refusal_changes_nothing() {
    let mut game: Game = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3KB1R w KQkq - 0 1"
        .parse()
        .unwrap();
    let before = game.clone();
    assert!(matches!(
        game.try_make_move(pos("E1"), pos("G1")),
        Err(MoveError::Castling(_))
    ));
    assert_eq!(game, before);
}

#[test]
fn undo_matches_snapshot() {
    let mut game = Game::new();
    game.make_move(pos("E2"), pos("E4"));
    game.make_move(pos("D7"), pos("D5"));
    let snapshot = game.board().snapshot();
    let to_move = game.player_to_move();

    assert!(game.make_move(pos("E4"), pos("D5")));
    assert!(game.undo_move());
    assert_eq!(game.board().snapshot(), snapshot);
    assert_eq!(game.player_to_move(), to_move);
    assert!(game.board().captured().is_empty());
}

#[test]
fn undo_reverts_castling_and_promotion() {
    let mut game: Game = "4k3/1P6/8/8/8/8/8/R3K3 w Q - 0 1".parse().unwrap();
    let start = game.clone();

    game.try_make_move(pos("E1"), pos("C1")).unwrap();
    game.try_make_move(pos("E8"), pos("F7")).unwrap();
    let info = game.try_make_move(pos("B7"), pos("B8")).unwrap();
    assert_eq!(info.promotion, Some(PieceKind::Queen));
    assert_eq!(
        game.board().history().map(ToString::to_string).collect::<Vec<_>>(),
        ["O-O-O", "E8-F7", "B7-B8=Q"]
    );

    while game.undo_move() {}
    assert_eq!(game, start);
}

#[test]
fn self_check_is_refused() {
    // the bishop on E2 is pinned by the queen on E8
    let mut game: Game = "4q1k1/8/8/8/8/8/4B3/4K3 w - - 0 1".parse().unwrap();
    assert_eq!(
        game.try_make_move(pos("E2"), pos("D3")),
        Err(MoveError::LeavesKingInCheck)
    );
    assert_eq!(game.player_to_move(), Color::White);
    assert!(game.board().legal_moves(pos("E2")).is_empty());
}
