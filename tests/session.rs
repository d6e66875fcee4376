use shedding_rs::agents::BotTier;
use shedding_rs::config::{GameConfig, SeatKind};
use shedding_rs::session::{MatchPolicy, Session, SessionError};

#[test]
fn mixed_table_plays_to_threshold() {
    let cfg = GameConfig {
        player_count: 3,
        win_threshold: 3,
        seats: vec![SeatKind::Bot(BotTier::Basic), SeatKind::Bot(BotTier::Heuristic), SeatKind::Bot(BotTier::Scored)],
        seed: Some(2024),
    };
    let mut session = Session::new(&cfg).unwrap();
    let summary = session.run_to_completion().unwrap();

    assert_eq!(summary.wins[summary.winner], 3);
    assert!(summary.wins.iter().all(|&w| w <= 3));
    assert_eq!(summary.wins.iter().sum::<u32>(), summary.rounds);
    assert_eq!(summary.losses.iter().sum::<u32>(), summary.rounds * 2);
    assert_eq!(session.winner(), Some(summary.winner));
    assert_eq!(session.step(), Ok(None), "nothing to do once decided");
}

#[test]
fn seeded_matches_repeat() {
    let run = || {
        let mut cfg = GameConfig::all_bots(4, BotTier::Basic).with_seed(8);
        cfg.win_threshold = 2;
        Session::new(&cfg).unwrap().run_to_completion().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn default_config_waits_for_the_human() {
    let cfg = GameConfig::default().with_seed(4);
    let mut session = Session::new(&cfg).unwrap();
    match session.run_to_completion() {
        Err(SessionError::AwaitingInput { seat }) => assert_eq!(seat, 0),
        other => panic!("expected to wait on the human seat, got {other:?}"),
    }
}

#[test]
fn policy_reads_win_counts() {
    let cfg = GameConfig::all_bots(2, BotTier::Heuristic).with_seed(6);
    let session = Session::new(&cfg).unwrap();
    assert_eq!(session.policy(), MatchPolicy { win_threshold: cfg.win_threshold });
    assert_eq!(session.winner(), None);
}
