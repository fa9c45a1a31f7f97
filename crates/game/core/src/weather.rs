//! Seasons, weather sampling and the move-budget modifier.
//!
//! Weather is drawn once per turn, when the dice are rolled, from a
//! season-specific discrete table. Weights are expressed in parts per
//! million so every table sums to exactly [`WeatherTable::TOTAL`].

/// Season of the year, advanced once per completed round.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Season for a global turn (completed rounds), cycling from Spring.
    pub const fn for_turn(global_turn: u32) -> Self {
        Self::ALL[(global_turn % 4) as usize]
    }

    pub fn table(self) -> &'static WeatherTable {
        match self {
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Autumn => &AUTUMN,
            Season::Winter => &WINTER,
        }
    }
}

/// Weather label for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sunny,
    #[strum(to_string = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    Rainy,
    Thunderstorm,
    Snow,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Weather::Sunny,
        Weather::PartlyCloudy,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Thunderstorm,
        Weather::Snow,
    ];

    /// Adjustment applied to the dice face when computing the move budget.
    pub const fn modifier(self) -> i8 {
        match self {
            Weather::Sunny => 1,
            Weather::PartlyCloudy | Weather::Cloudy => 0,
            Weather::Rainy => -1,
            Weather::Thunderstorm | Weather::Snow => -2,
        }
    }

    /// Flavor text describing the effects of this weather.
    pub const fn description(self) -> &'static str {
        match self {
            Weather::Sunny => {
                "+20% Resource Efficiency, +10% Task Speed, +30% Community Morale"
            }
            Weather::PartlyCloudy => "No changes",
            Weather::Cloudy => "-10% Community Morale",
            Weather::Rainy => "-10% Resource Efficiency, -20% Task Speed, -20% Community Morale",
            Weather::Thunderstorm => {
                "-30% Resource Efficiency, -50% Task Speed, -50% Community Morale"
            }
            Weather::Snow => "-70% Resource Efficiency, -90% Task Speed, -50% Community Morale",
        }
    }
}

/// Discrete probability table for one season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeatherTable {
    weights: &'static [(Weather, u32)],
}

impl WeatherTable {
    /// Sum of the weights of every table.
    pub const TOTAL: u32 = 1_000_000;

    pub const fn weights(&self) -> &'static [(Weather, u32)] {
        self.weights
    }

    /// Weight of `weather` in this table (zero if absent).
    pub fn weight_of(&self, weather: Weather) -> u32 {
        self.weights
            .iter()
            .find(|(w, _)| *w == weather)
            .map(|(_, weight)| *weight)
            .unwrap_or(0)
    }

    /// Maps a uniform draw onto a weather label.
    pub fn sample(&self, roll: u32) -> Weather {
        let mut point = roll % Self::TOTAL;
        for &(weather, weight) in self.weights {
            if point < weight {
                return weather;
            }
            point -= weight;
        }
        // Tables sum to TOTAL, so this is only reached through a malformed table.
        self.weights
            .last()
            .map(|(weather, _)| *weather)
            .unwrap_or(Weather::PartlyCloudy)
    }
}

const SPRING: WeatherTable = WeatherTable {
    weights: &[
        (Weather::Sunny, 350_000),
        (Weather::PartlyCloudy, 200_000),
        (Weather::Cloudy, 150_000),
        (Weather::Rainy, 230_000),
        (Weather::Thunderstorm, 70_000),
    ],
};

const SUMMER: WeatherTable = WeatherTable {
    weights: &[
        (Weather::Sunny, 500_000),
        (Weather::PartlyCloudy, 250_000),
        (Weather::Cloudy, 150_000),
        (Weather::Rainy, 80_000),
        (Weather::Thunderstorm, 20_000),
    ],
};

const AUTUMN: WeatherTable = WeatherTable {
    weights: &[
        (Weather::Sunny, 100_000),
        (Weather::PartlyCloudy, 230_000),
        (Weather::Cloudy, 150_000),
        (Weather::Rainy, 500_000),
        (Weather::Thunderstorm, 20_000),
    ],
};

const WINTER: WeatherTable = WeatherTable {
    weights: &[
        (Weather::Sunny, 150_000),
        (Weather::PartlyCloudy, 100_000),
        (Weather::Cloudy, 300_000),
        (Weather::Rainy, 250_000),
        (Weather::Thunderstorm, 199_999),
        (Weather::Snow, 1),
    ],
};

/// Samples the weather for `season` from a uniform 32-bit draw.
pub fn sample_weather(season: Season, roll: u32) -> Weather {
    season.table().sample(roll)
}

pub const fn modifier_for(weather: Weather) -> i8 {
    weather.modifier()
}

pub const fn season_for(global_turn: u32) -> Season {
    Season::for_turn(global_turn)
}

/// Move budget for a dice face under the given weather; never below one.
pub fn move_budget(face: u8, weather: Weather) -> u8 {
    let budget = i16::from(face) + i16::from(weather.modifier());
    budget.clamp(1, i16::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_sums_to_total() {
        for season in Season::ALL {
            let sum: u32 = season.table().weights().iter().map(|(_, w)| w).sum();
            assert_eq!(sum, WeatherTable::TOTAL, "{season}");
        }
    }

    #[test]
    fn snow_only_appears_in_winter() {
        for season in [Season::Spring, Season::Summer, Season::Autumn] {
            assert_eq!(season.table().weight_of(Weather::Snow), 0);
        }
        assert_eq!(Season::Winter.table().weight_of(Weather::Snow), 1);
        assert_eq!(sample_weather(Season::Winter, 999_999), Weather::Snow);
    }

    #[test]
    fn spring_bands_follow_table_order() {
        assert_eq!(sample_weather(Season::Spring, 0), Weather::Sunny);
        assert_eq!(sample_weather(Season::Spring, 349_999), Weather::Sunny);
        assert_eq!(sample_weather(Season::Spring, 350_000), Weather::PartlyCloudy);
        assert_eq!(sample_weather(Season::Spring, 700_000), Weather::Rainy);
        assert_eq!(sample_weather(Season::Spring, 800_000), Weather::Rainy);
        assert_eq!(sample_weather(Season::Spring, 930_000), Weather::Thunderstorm);
    }

    #[test]
    fn move_budget_is_at_least_one_for_all_faces_and_modifiers() {
        for face in 1..=6u8 {
            for weather in Weather::ALL {
                let budget = move_budget(face, weather);
                assert!(budget >= 1);
                let expected = (i16::from(face) + i16::from(weather.modifier())).max(1);
                assert_eq!(i16::from(budget), expected);
            }
        }
    }

    #[test]
    fn rainy_three_gives_two_moves() {
        assert_eq!(move_budget(3, Weather::Rainy), 2);
        assert_eq!(move_budget(1, Weather::Thunderstorm), 1);
        assert_eq!(move_budget(6, Weather::Sunny), 7);
    }

    #[test]
    fn seasons_cycle_per_round() {
        assert_eq!(season_for(0), Season::Spring);
        assert_eq!(season_for(1), Season::Summer);
        assert_eq!(season_for(3), Season::Winter);
        assert_eq!(season_for(4), Season::Spring);
    }

    #[test]
    fn modifiers_match_weather() {
        assert_eq!(modifier_for(Weather::Sunny), 1);
        assert_eq!(modifier_for(Weather::Cloudy), 0);
        assert_eq!(modifier_for(Weather::Rainy), -1);
        assert_eq!(modifier_for(Weather::Snow), -2);
    }
}
