use shedding_rs::agents::{AgentTable, BotAgent, BotProfile, BotTier, PlayerAgent};
use shedding_rs::cards::parse_cards;
use shedding_rs::config::GameConfig;
use shedding_rs::game::{Game, Phase, TurnOutcome};

fn mk_game(n: usize, seed: u64) -> Game {
    let mut g = Game::new(&GameConfig::all_bots(n, BotTier::Basic).with_seed(seed)).unwrap();
    g.new_round().unwrap();
    g
}

#[test]
fn non_current_seat_is_a_noop() {
    let mut g = mk_game(3, 1);
    let cur = g.current();
    let other = (cur + 1) % g.player_count();
    let mut bot = BotAgent::new(BotProfile::default().with_seed(1));
    assert_eq!(bot.on_turn(&mut g, other), Ok(None));
    assert_eq!(g.current(), cur);
    assert_eq!(g.history_len(), 0);
}

#[test]
fn leading_bot_always_plays() {
    for tier in BotTier::ALL {
        let mut g = mk_game(4, 11);
        let cur = g.current();
        let before = g.hand(cur).unwrap().len();
        let mut bot = BotAgent::new(BotProfile::for_tier(tier).with_seed(5));
        let outcome = bot.on_turn(&mut g, cur).unwrap();
        assert_eq!(outcome, Some(TurnOutcome::Continue), "{tier:?}");
        assert!(g.hand(cur).unwrap().len() < before);
        assert_ne!(g.current(), cur);
    }
}

#[test]
fn bot_passes_when_nothing_beats() {
    let cfg = GameConfig::all_bots(2, BotTier::Scored);
    let mut g = Game::with_hands(&cfg, vec![parse_cards("3D BJ 4C").unwrap(), parse_cards("6C 7D").unwrap()]).unwrap();
    g.play(0, &parse_cards("BJ").unwrap()).unwrap();
    let mut bot = BotAgent::new(BotProfile::for_tier(BotTier::Scored));
    assert_eq!(bot.on_turn(&mut g, 1), Ok(Some(TurnOutcome::TrickResolved { leader: 0 })));
}

#[test]
fn every_tier_finishes_a_round() {
    for tier in BotTier::ALL {
        for players in 2..=6 {
            let cfg = GameConfig::all_bots(players, tier).with_seed(players as u64 * 31);
            let mut g = Game::new(&cfg).unwrap();
            g.new_round().unwrap();
            let mut table = AgentTable::from_config(&cfg);

            let mut turns = 0;
            while g.phase() != Phase::RoundOver {
                let acted = table.on_turn(&mut g).unwrap();
                assert!(acted.is_some(), "{tier:?} bot at seat {} did not act", g.current());
                turns += 1;
                assert!(turns < 5_000, "{tier:?} with {players} players did not finish");
            }
            let result = g.last_round().unwrap();
            assert!(g.hand(result.winner).unwrap().is_empty());
            assert_eq!(result.losers.len(), players - 1);
        }
    }
}
