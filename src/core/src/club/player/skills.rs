use serde::{Deserialize, Serialize};

fn default_attribute() -> u8 {
    10
}

fn default_ability() -> u8 {
    100
}

/// Full attribute bundle for one player, every value on the 1..=20 scale.
/// Attributes absent from the input default to 10; the ability aggregates
/// live on the 0..=200 scale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerAttributes {
    #[serde(default)]
    pub technical: Technical,
    #[serde(default)]
    pub mental: Mental,
    #[serde(default)]
    pub physical: Physical,
    #[serde(default)]
    pub goalkeeping: Goalkeeping,

    #[serde(default = "default_ability")]
    pub current_ability: u8,
    #[serde(default = "default_ability")]
    pub potential_ability: u8,
}

macro_rules! attribute_group {
    ($name:ident, $($field:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(default = "default_attribute")]
                pub $field: u8,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                $name {
                    $($field: default_attribute(),)+
                }
            }
        }

        impl $name {
            pub fn average(&self) -> f32 {
                let mut sum = 0.0f32;
                let mut count = 0.0f32;
                $(
                    sum += self.$field as f32;
                    count += 1.0;
                )+
                sum / count
            }
        }
    };
}

attribute_group!(
    Technical,
    corners,
    crossing,
    dribbling,
    finishing,
    first_touch,
    free_kick_taking,
    heading,
    long_shots,
    long_throws,
    marking,
    passing,
    penalty_taking,
    tackling,
    technique,
);

attribute_group!(
    Mental,
    aggression,
    anticipation,
    bravery,
    composure,
    concentration,
    decisions,
    determination,
    flair,
    leadership,
    off_the_ball,
    positioning,
    teamwork,
    vision,
    work_rate,
);

attribute_group!(
    Physical,
    acceleration,
    agility,
    balance,
    jumping_reach,
    natural_fitness,
    pace,
    stamina,
    strength,
);

attribute_group!(
    Goalkeeping,
    aerial_reach,
    command_of_area,
    handling,
    kicking,
    one_on_ones,
    reflexes,
    rushing_out,
    throwing,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default_to_ten() {
        let attrs: PlayerAttributes = serde_json::from_str("{}").unwrap();

        assert_eq!(attrs.technical.finishing, 10);
        assert_eq!(attrs.mental.aggression, 10);
        assert_eq!(attrs.physical.pace, 10);
        assert_eq!(attrs.goalkeeping.reflexes, 10);
        assert_eq!(attrs.current_ability, 100);
    }

    #[test]
    fn test_partial_group_keeps_defaults_for_the_rest() {
        let attrs: PlayerAttributes =
            serde_json::from_str(r#"{"technical": {"finishing": 18}}"#).unwrap();

        assert_eq!(attrs.technical.finishing, 18);
        assert_eq!(attrs.technical.passing, 10);
    }

    #[test]
    fn test_group_average() {
        let mut technical = Technical::default();
        technical.finishing = 20;
        // 13 attributes at 10 plus one at 20
        let expected = (13.0 * 10.0 + 20.0) / 14.0;
        assert!((technical.average() - expected).abs() < f32::EPSILON);
    }
}
