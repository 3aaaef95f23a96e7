use match_core::{Player, PlayerAttributes, PlayerPosition, Team};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "Adam", "Bruno", "Carlos", "Dani", "Emil", "Felix", "Goran", "Hugo", "Ivan", "Jonas",
    "Karim", "Luca", "Marco", "Nico", "Oscar", "Pavel", "Rui", "Sergio", "Tomas", "Viktor",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barros", "Costa", "Dias", "Esteves", "Ferreira", "Gomes", "Horvat", "Ivic",
    "Jensen", "Kovac", "Lima", "Martins", "Novak", "Oliveira", "Pereira", "Ramos", "Silva",
    "Teixeira", "Vidal",
];

/// Deterministic squad generator for the out-of-the-box fixtures. The team
/// id seeds the RNG, so restarts produce the same rosters.
pub struct TeamGenerator;

impl TeamGenerator {
    pub fn generate(team_id: u32, name: &str, color: &str, strength: u8) -> Team {
        let mut rng = StdRng::seed_from_u64(team_id as u64);

        let positions: [(PlayerPosition, usize); 10] = [
            (PlayerPosition::Goalkeeper, 2),
            (PlayerPosition::DefenderCenter, 3),
            (PlayerPosition::DefenderLeft, 1),
            (PlayerPosition::DefenderRight, 1),
            (PlayerPosition::DefensiveMidfielder, 2),
            (PlayerPosition::MidfielderCenter, 3),
            (PlayerPosition::WingerLeft, 1),
            (PlayerPosition::WingerRight, 1),
            (PlayerPosition::AttackingMidfielder, 1),
            (PlayerPosition::Striker, 3),
        ];

        let mut players = Vec::new();
        let mut shirt = 1u8;
        for (position, count) in positions {
            for _ in 0..count {
                let id = team_id * 100 + shirt as u32;
                players.push(Self::player(&mut rng, id, shirt, position, strength));
                shirt += 1;
            }
        }

        Team {
            id: team_id,
            name: name.to_string(),
            color: color.to_string(),
            players,
        }
    }

    fn player(
        rng: &mut StdRng,
        id: u32,
        shirt: u8,
        position: PlayerPosition,
        strength: u8,
    ) -> Player {
        let name = format!(
            "{} {}",
            FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.random_range(0..LAST_NAMES.len())]
        );

        Player {
            id,
            name,
            shirt_number: shirt,
            position,
            secondary_positions: Self::secondary_positions(position),
            is_injured: false,
            attributes: Self::attributes(rng, position, strength),
        }
    }

    fn secondary_positions(position: PlayerPosition) -> Vec<PlayerPosition> {
        match position {
            PlayerPosition::Striker => vec![PlayerPosition::ForwardCenter],
            PlayerPosition::MidfielderCenter => vec![PlayerPosition::AttackingMidfielder],
            PlayerPosition::DefenderLeft => vec![PlayerPosition::Wingback],
            PlayerPosition::DefenderRight => vec![PlayerPosition::Wingback],
            _ => Vec::new(),
        }
    }

    fn attributes(rng: &mut StdRng, position: PlayerPosition, strength: u8) -> PlayerAttributes {
        let floor = 6 + strength / 4;
        let span = 8;
        let mut roll = |bonus: u8| -> u8 {
            (rng.random_range(floor..floor + span) + bonus).min(20)
        };

        let mut attrs = PlayerAttributes::default();

        attrs.mental.aggression = roll(0);
        attrs.mental.anticipation = roll(0);
        attrs.mental.composure = roll(0);
        attrs.mental.concentration = roll(0);
        attrs.mental.decisions = roll(0);
        attrs.mental.teamwork = roll(0);
        attrs.mental.vision = roll(0);
        attrs.mental.work_rate = roll(0);
        attrs.mental.off_the_ball = roll(0);
        attrs.mental.positioning = roll(0);
        attrs.mental.bravery = roll(0);

        attrs.physical.acceleration = roll(0);
        attrs.physical.agility = roll(0);
        attrs.physical.balance = roll(0);
        attrs.physical.jumping_reach = roll(0);
        attrs.physical.pace = roll(0);
        attrs.physical.stamina = roll(2);
        attrs.physical.strength = roll(0);
        attrs.physical.natural_fitness = roll(2);

        attrs.technical.passing = roll(0);
        attrs.technical.first_touch = roll(0);
        attrs.technical.technique = roll(0);
        attrs.technical.dribbling = roll(0);
        attrs.technical.crossing = roll(0);
        attrs.technical.corners = roll(0);
        attrs.technical.free_kick_taking = roll(0);
        attrs.technical.penalty_taking = roll(0);
        attrs.technical.long_shots = roll(0);
        attrs.technical.heading = roll(0);

        match position {
            PlayerPosition::Goalkeeper => {
                attrs.goalkeeping.reflexes = roll(4);
                attrs.goalkeeping.handling = roll(4);
                attrs.goalkeeping.one_on_ones = roll(3);
                attrs.goalkeeping.command_of_area = roll(3);
                attrs.goalkeeping.aerial_reach = roll(3);
                attrs.goalkeeping.kicking = roll(2);
                attrs.goalkeeping.throwing = roll(1);
                attrs.goalkeeping.rushing_out = roll(1);
            }
            p if p.is_defender() => {
                attrs.technical.tackling = roll(4);
                attrs.technical.marking = roll(4);
                attrs.mental.positioning = roll(3);
                attrs.technical.heading = roll(2);
            }
            p if p.is_midfielder() => {
                attrs.technical.passing = roll(4);
                attrs.mental.vision = roll(3);
                attrs.technical.tackling = roll(1);
            }
            _ => {
                attrs.technical.finishing = roll(4);
                attrs.mental.off_the_ball = roll(3);
                attrs.physical.pace = roll(2);
                attrs.technical.dribbling = roll(2);
            }
        }

        attrs.current_ability = 90 + strength + rng.random_range(0..20);
        attrs.potential_ability = attrs.current_ability.saturating_add(10).min(200);

        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic_per_team_id() {
        let a = TeamGenerator::generate(7, "Test", "red", 30);
        let b = TeamGenerator::generate(7, "Test", "red", 30);

        let names_a: Vec<&String> = a.players.iter().map(|p| &p.name).collect();
        let names_b: Vec<&String> = b.players.iter().map(|p| &p.name).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_squad_shape() {
        let team = TeamGenerator::generate(1, "Shape", "blue", 30);

        assert_eq!(team.players.len(), 18);
        let keepers = team.players.iter().filter(|p| p.is_goalkeeper()).count();
        assert_eq!(keepers, 2);

        // Shirt numbers and ids are unique
        let mut shirts: Vec<u8> = team.players.iter().map(|p| p.shirt_number).collect();
        shirts.sort();
        shirts.dedup();
        assert_eq!(shirts.len(), 18);
    }

    #[test]
    fn test_attributes_stay_on_scale() {
        let team = TeamGenerator::generate(3, "Scale", "green", 40);
        for player in &team.players {
            assert!(player.attributes.technical.finishing <= 20);
            assert!(player.attributes.goalkeeping.reflexes <= 20);
            assert!(player.attributes.current_ability <= 200);
        }
    }

    #[test]
    fn test_keepers_out_handle_outfielders() {
        let team = TeamGenerator::generate(5, "Gloves", "black", 30);
        let keeper = team.players.iter().find(|p| p.is_goalkeeper()).unwrap();
        let striker = team
            .players
            .iter()
            .find(|p| p.position == PlayerPosition::Striker)
            .unwrap();

        assert!(
            keeper.attributes.goalkeeping.reflexes > striker.attributes.goalkeeping.reflexes
        );
    }
}
