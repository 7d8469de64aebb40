use casino_types::Game;

/// Playable demo games, in display order.
pub static GAMES: [Game; 3] = [
    Game {
        id: "slot",
        name: "Slot Spin",
        icon: "🎰",
        description: "Spin to win! Random outcomes with a rare big prize.",
        min_bet: 1,
        max_bet_hint: 200,
    },
    Game {
        id: "coin",
        name: "Coin Flip",
        icon: "🪙",
        description: "50/50 chance to double your bet.",
        min_bet: 1,
        max_bet_hint: 500,
    },
    Game {
        id: "dice",
        name: "Dice Roll",
        icon: "🎲",
        description: "Roll a die. 4+ wins; 6 pays more.",
        min_bet: 1,
        max_bet_hint: 300,
    },
];

pub fn games() -> &'static [Game] {
    &GAMES
}

pub fn find_game(id: &str) -> Option<&'static Game> {
    GAMES.iter().find(|game| game.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = games().iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), games().len());
    }

    #[test]
    fn test_min_bets_are_positive() {
        assert!(games().iter().all(|g| g.min_bet >= 1));
    }

    #[test]
    fn test_find_game() {
        assert_eq!(find_game("dice").map(|g| g.name), Some("Dice Roll"));
        assert!(find_game("roulette").is_none());
        assert!(find_game("").is_none());
    }
}
