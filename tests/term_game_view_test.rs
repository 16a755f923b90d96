use crossterm::event::{KeyCode, KeyEvent};

use relic_tetris::core::{ActivePiece, GameState};
use relic_tetris::input::handle_key_event;
use relic_tetris::term::{AnchorY, FrameBuffer, GameView, Rgb, StatusLine, Viewport};
use relic_tetris::types::{GamePhase, PieceKind, Variant};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.extend(fb.row(y).iter().map(|c| c.ch));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_draws_locked_cells() {
    let mut gs = GameState::new(Variant::Classic, 1);
    gs.board_mut().set(0, 19, Some(PieceKind::I));
    let snap = gs.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, None, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let cell = fb.get(1, 1 + 19).expect("inside viewport");
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, Rgb::from(PieceKind::I.color()));
    assert_eq!(fb.get(2, 1 + 19).map(|c| c.ch), Some('█'));
}

#[test]
fn term_view_sizes_frame_to_variant() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let classic = GameState::new(Variant::Classic, 1);
    let fb = view.render(&classic.snapshot(), None, Viewport::new(22, 22));
    assert_eq!(fb.get(21, 21).map(|c| c.ch), Some('┘'));

    let relic = GameState::new(Variant::Relic, 1);
    let fb = view.render(&relic.snapshot(), None, Viewport::new(34, 32));
    assert_eq!(fb.get(33, 31).map(|c| c.ch), Some('┘'));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let state = GameState::new(Variant::Classic, 1);
    let fb = GameView::default().render(&state.snapshot(), None, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).map(|c| c.ch), Some('┌'));
}

#[test]
fn term_view_draws_ghost_below_active() {
    let mut gs = GameState::new(Variant::Arsenal, 1);
    gs.set_active(ActivePiece::spawn(PieceKind::O, 16));
    let snap = gs.snapshot();
    assert_eq!(snap.ghost_y, Some(28));

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, None, Viewport::new(34, 32));
    // O at x=7: terminal columns 1 + 7*2.
    assert_eq!(fb.get(15, 1 + 28).map(|c| c.ch), Some('░'));
    assert_eq!(fb.get(15, 1).map(|c| c.ch), Some('█'));
}

#[test]
fn keys_drive_the_game_and_the_view() {
    let mut gs = GameState::new(Variant::Arsenal, 4);
    let key = |code| handle_key_event(KeyEvent::from(code)).expect("mapped key");

    assert!(gs.apply_command(key(KeyCode::Char('p'))));
    assert_eq!(gs.phase(), GamePhase::Paused);
    let fb = GameView::default().render(&gs.snapshot(), None, Viewport::new(80, 34));
    assert!(screen_text(&fb).contains("PAUSED"));

    assert!(gs.apply_command(key(KeyCode::Char('p'))));
    assert!(gs.apply_command(key(KeyCode::Char('c'))));
    assert!(gs.hold_piece().is_some());
    assert!(gs.apply_command(key(KeyCode::Char(' '))));

    let status = gs.drain_events().find_map(|e| StatusLine::from_event(&e));
    let fb = GameView::default().render(&gs.snapshot(), status, Viewport::new(80, 34));
    let text = screen_text(&fb);
    assert!(text.contains("HOLD"));
    assert!(text.contains("SCORE"));
}

#[test]
fn game_over_overlay() {
    let mut gs = GameState::new(Variant::Classic, 4);
    for y in 0..2 {
        for x in 3..7 {
            gs.board_mut().set(x, y, Some(PieceKind::Z));
        }
    }
    gs.set_active(ActivePiece {
        x: 0,
        y: 10,
        ..ActivePiece::spawn(PieceKind::O, 10)
    });
    gs.apply_command(handle_key_event(KeyEvent::from(KeyCode::Char(' '))).expect("space"));
    assert_eq!(gs.phase(), GamePhase::GameOver);

    let fb = GameView::default().render(&gs.snapshot(), None, Viewport::new(60, 24));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("ENTER to restart"));
}
