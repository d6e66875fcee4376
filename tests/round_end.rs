use shedding_rs::agents::BotTier;
use shedding_rs::cards::{parse_cards, Card};
use shedding_rs::config::GameConfig;
use shedding_rs::game::{Game, Phase, PlayError, RoundResult, SetupError, TurnOutcome};

fn mk_game(hands: &[&str]) -> Game {
    let cfg = GameConfig::all_bots(hands.len(), BotTier::Basic);
    Game::with_hands(&cfg, hands.iter().map(|h| parse_cards(h).unwrap()).collect()).unwrap()
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn emptying_a_hand_ends_the_round() {
    let mut g = mk_game(&["3D 4C", "6C 7D", "7C 8C 9C"]);
    g.play(0, &cards("3D")).unwrap();
    g.pass(1).unwrap();
    g.pass(2).unwrap();
    let outcome = g.play(0, &cards("4C")).unwrap();
    assert_eq!(outcome, TurnOutcome::RoundWon(RoundResult { round: 1, winner: 0, losers: vec![1, 2] }));
    assert_eq!(g.phase(), Phase::RoundOver);

    let tally: Vec<(u32, u32)> = g.players().iter().map(|p| (p.wins(), p.losses())).collect();
    assert_eq!(tally, vec![(1, 0), (0, 1), (0, 1)]);
    assert_eq!(g.pass(1), Err(PlayError::RoundOver));
    assert!(g.legal_moves(1).is_empty());
    assert_eq!(g.last_round().map(|r| r.winner), Some(0));
}

#[test]
fn round_one_leader_holds_the_starter() {
    for seed in 0..8 {
        let mut g = Game::new(&GameConfig::all_bots(4, BotTier::Basic).with_seed(seed)).unwrap();
        g.new_round().unwrap();
        let holder = g.players().iter().position(|p| p.hand().contains(Card::STARTER));
        assert_eq!(Some(g.current()), holder.or(Some(0)), "seed {seed}");
        assert_eq!(g.trick().leader(), g.current());
    }
}

#[test]
fn next_round_led_by_previous_winner() {
    let mut g = mk_game(&["3D", "6C 7D", "7C 8C"]);
    g.play(0, &cards("3D")).unwrap();
    g.new_round().unwrap();
    assert_eq!(g.round(), 2);
    assert_eq!(g.current(), 0);
    assert_eq!(g.phase(), Phase::LeadOpen);
    assert_eq!(g.players()[0].wins(), 1);
}

#[test]
fn deals_are_even_with_remainder_undealt() {
    let mut five = Game::new(&GameConfig::all_bots(5, BotTier::Basic).with_seed(3)).unwrap();
    five.new_round().unwrap();
    assert_eq!(five.card_counts(), vec![10; 5]);
    assert_eq!(five.undealt().len(), 4);

    let mut six = Game::new(&GameConfig::all_bots(6, BotTier::Basic).with_seed(3)).unwrap();
    six.new_round().unwrap();
    assert_eq!(six.deck_count(), 2);
    assert_eq!(six.card_counts(), vec![18; 6]);
    assert!(six.undealt().is_empty());
}

#[test]
fn seeded_deals_repeat() {
    let deal = |seed| {
        let mut g = Game::new(&GameConfig::all_bots(3, BotTier::Basic).with_seed(seed)).unwrap();
        g.new_round().unwrap();
        g.hand(0).unwrap().clone()
    };
    assert_eq!(deal(42), deal(42));
}

#[test]
fn fixed_hands_validated_against_deck() {
    let cfg = GameConfig::all_bots(2, BotTier::Basic);
    assert!(matches!(
        Game::with_hands(&cfg, vec![cards("5H"), cards("5H")]),
        Err(SetupError::Invariant(_))
    ));
    assert!(matches!(Game::with_hands(&cfg, vec![cards("5H")]), Err(SetupError::Invariant(_))));

    let two_decks = GameConfig::all_bots(6, BotTier::Basic);
    let hands = vec![cards("5H"), cards("5H"), cards("3D"), cards("4C"), cards("4D"), cards("4H")];
    let g = Game::with_hands(&two_decks, hands).unwrap();
    assert_eq!(g.current(), 2);
}
