/// Color family a rank is drawn in
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Tint {
    Dirt,
    Wood,
    Stone,
    Iron,
    Gold,
    Diamond,
    Netherite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rank {
    pub threshold: u32,
    pub title: &'static str,
    pub tint: Tint,
}

pub const RANKS: [Rank; 7] = [
    Rank { threshold: 0, title: "Dirt Rank", tint: Tint::Dirt },
    Rank { threshold: 500, title: "Wood Rank", tint: Tint::Wood },
    Rank { threshold: 1000, title: "Stone Rank", tint: Tint::Stone },
    Rank { threshold: 2000, title: "Iron Rank", tint: Tint::Iron },
    Rank { threshold: 3500, title: "Gold Rank", tint: Tint::Gold },
    Rank { threshold: 5000, title: "Diamond Rank", tint: Tint::Diamond },
    Rank { threshold: 7000, title: "Netherite Rank", tint: Tint::Netherite },
];

/// Highest rank whose threshold the score reaches
pub fn rank_for(score: u32) -> Rank {
    RANKS
        .iter()
        .rev()
        .find(|r| score >= r.threshold)
        .copied()
        .unwrap_or(RANKS[0])
}

/// Character cheering (or not) on the results screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Mascot {
    Steve,
    Alex,
    Creeper,
    Skeleton,
    Zombie,
}

impl Mascot {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s > 5000 => Mascot::Steve,
            s if s > 2500 => Mascot::Alex,
            s if s > 1000 => Mascot::Creeper,
            s if s > 500 => Mascot::Skeleton,
            _ => Mascot::Zombie,
        }
    }

    pub fn cheer(&self) -> &'static str {
        match self {
            Mascot::Steve | Mascot::Alex => "Great Job!",
            _ => "Nice Try!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(rank_for(0).title, "Dirt Rank");
        assert_eq!(rank_for(499).title, "Dirt Rank");
        assert_eq!(rank_for(500).title, "Wood Rank");
        assert_eq!(rank_for(1999).title, "Stone Rank");
        assert_eq!(rank_for(3500).tint, Tint::Gold);
        assert_eq!(rank_for(6999).title, "Diamond Rank");
        assert_eq!(rank_for(7000).title, "Netherite Rank");
        assert_eq!(rank_for(u32::MAX).title, "Netherite Rank");
    }

    #[test]
    fn test_ranks_are_sorted() {
        assert!(RANKS.windows(2).all(|w| w[0].threshold < w[1].threshold));
    }

    #[test]
    fn test_mascot_boundaries_are_exclusive() {
        assert_eq!(Mascot::for_score(500), Mascot::Zombie);
        assert_eq!(Mascot::for_score(501), Mascot::Skeleton);
        assert_eq!(Mascot::for_score(1001), Mascot::Creeper);
        assert_eq!(Mascot::for_score(2501), Mascot::Alex);
        assert_eq!(Mascot::for_score(5000), Mascot::Alex);
        assert_eq!(Mascot::for_score(5001), Mascot::Steve);
    }

    #[test]
    fn test_mascot_cheer() {
        assert_eq!(Mascot::Steve.cheer(), "Great Job!");
        assert_eq!(Mascot::Zombie.cheer(), "Nice Try!");
    }
}
