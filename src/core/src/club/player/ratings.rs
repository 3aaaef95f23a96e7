use crate::club::player::skills::PlayerAttributes;

/// Position-weighted scalar ratings derived from the raw attribute bundle.
/// Each rating is a fixed weighted sum clamped back to the 1..=20 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingKind {
    Goalkeeping,
    Defending,
    Midfield,
    Attacking,
    Pace,
    Aerial,
    Discipline,
}

impl PlayerAttributes {
    pub fn effective(&self, kind: RatingKind) -> f32 {
        let t = &self.technical;
        let m = &self.mental;
        let p = &self.physical;
        let g = &self.goalkeeping;

        let value = match kind {
            RatingKind::Goalkeeping => {
                0.30 * g.reflexes as f32
                    + 0.25 * g.handling as f32
                    + 0.15 * g.one_on_ones as f32
                    + 0.15 * g.command_of_area as f32
                    + 0.15 * g.aerial_reach as f32
            }
            RatingKind::Defending => {
                0.30 * t.tackling as f32
                    + 0.25 * t.marking as f32
                    + 0.20 * m.positioning as f32
                    + 0.15 * m.anticipation as f32
                    + 0.10 * p.strength as f32
            }
            RatingKind::Midfield => {
                0.30 * t.passing as f32
                    + 0.25 * m.vision as f32
                    + 0.15 * t.technique as f32
                    + 0.15 * m.decisions as f32
                    + 0.15 * t.first_touch as f32
            }
            RatingKind::Attacking => {
                0.35 * t.finishing as f32
                    + 0.20 * m.composure as f32
                    + 0.15 * m.off_the_ball as f32
                    + 0.15 * t.technique as f32
                    + 0.15 * m.anticipation as f32
            }
            RatingKind::Pace => 0.60 * p.pace as f32 + 0.40 * p.acceleration as f32,
            RatingKind::Aerial => {
                0.45 * t.heading as f32
                    + 0.35 * p.jumping_reach as f32
                    + 0.20 * m.bravery as f32
            }
            RatingKind::Discipline => {
                0.40 * m.composure as f32
                    + 0.30 * m.concentration as f32
                    + 0.30 * m.teamwork as f32
            }
        };

        value.clamp(1.0, 20.0)
    }
}
