use danmaku::compute::init_state;
use danmaku::config::Balance;
use danmaku::entities::GameStatus;
use danmaku::render::*;

fn log() -> DrawLog {
    DrawLog::new(240.0, 320.0)
}

#[test]
fn title_screen_shows_prompt_and_best() {
    let s = init_state(Balance::default(), 4200);
    let mut surface = log();
    draw_frame(&s, &mut surface);

    assert_eq!(surface.commands[0], DrawCommand::Cls(palette::BLACK));
    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"DANMAKU SHOOTER"));
    assert!(texts.contains(&"BEST 4200"));
    assert!(texts.contains(&"PRESS Z OR TAP TO START"));
}

#[test]
fn hud_while_playing() {
    let mut s = init_state(Balance::default(), 0);
    s.status = GameStatus::Playing;
    s.score = 120;
    let mut surface = log();
    draw_frame(&s, &mut surface);

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"SCORE 120"));
    assert!(texts.contains(&"LIVES 3  BOMBS 3"));
    assert!(texts.contains(&"POWER 1"));
    // ship sprite from image bank 0
    assert!(surface
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Blt { bank: 0, .. })));
}

#[test]
fn result_overlays() {
    let mut s = init_state(Balance::default(), 0);
    s.status = GameStatus::Cleared;
    let mut surface = log();
    draw_frame(&s, &mut surface);
    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"STAGE CLEAR!"));
    assert!(texts.contains(&"CONGRATULATIONS!"));

    s.status = GameStatus::GameOver;
    draw_frame(&s, &mut surface);
    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"GAME OVER"));
    assert!(texts.contains(&"PRESS R OR TAP TO RESTART"));
    assert!(!texts.contains(&"STAGE CLEAR!"));
}
