//! Intersections: angle-ordered legs, turn computation and lane edits

use log::{debug, info, warn};

use super::angle::{Angle, FULL_TURN};
use super::coordinates::Coordinates;
use super::directions::Directions;
use super::error::{JunctionError, Result};
use super::lane_operation::{self, LaneOperation};
use super::leg::Leg;
use super::phase::{Compression, PhaseCompressor, StateRenderer};
use super::sequence::Sequence;
use super::signal_group::{Detector, SignalGroup};
use super::signal_program::SignalProgram;
use super::types::{GridPosition, IntersectionId, LegIndex, ProgramId};

/// Angle the leg order starts from
pub const LEG_ORDER_START: u16 = 180;

/// A junction of legs
#[derive(Debug, Clone)]
pub struct Intersection {
    id: IntersectionId,
    coordinates: Coordinates,
    grid_position: GridPosition,
    /// Rotation of the whole intersection
    angle: Angle,
    legs: Vec<Leg>,
    directions: Directions,
    programs: Vec<SignalProgram>,
    selected_program: Option<ProgramId>,
}

impl Intersection {
    pub fn new(
        id: IntersectionId,
        coordinates: Coordinates,
        grid_position: GridPosition,
        angle: Angle,
        legs: Vec<Leg>,
        programs: Vec<SignalProgram>,
    ) -> Self {
        let legs = sort_legs_by_angle(id, legs);
        let directions = directions_from_legs(&legs);
        let selected_program = programs.first().map(|program| program.id);
        Self {
            id,
            coordinates,
            grid_position,
            angle,
            legs,
            directions,
            programs,
            selected_program,
        }
    }

    pub fn id(&self) -> IntersectionId {
        self.id
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn grid_position(&self) -> GridPosition {
        self.grid_position
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Legs ordered by angle, starting at 180°
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Movements the junction offers, classified by leg compass octant
    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    pub fn leg_at(&self, index: LegIndex) -> Option<&Leg> {
        self.legs.get(index.0)
    }

    pub fn leg(&self, leg_id: &str) -> Result<&Leg> {
        self.legs
            .iter()
            .find(|leg| leg.id() == leg_id)
            .ok_or_else(|| JunctionError::ElementNotFound(format!("Leg by ID: {}", leg_id)))
    }

    pub fn leg_index(&self, leg_id: &str) -> Result<LegIndex> {
        self.leg(leg_id).map(Leg::index)
    }

    pub fn leg_angles(&self) -> Vec<Angle> {
        self.legs.iter().map(Leg::angle).collect()
    }

    /// Resolve adjacency and lane outputs for every leg
    pub fn calculate_turns(&mut self) {
        let angles = self.leg_angles();
        for leg in &mut self.legs {
            leg.calculate_turns(&angles);
            leg.refresh_output_legs();
        }
    }

    /// Validate the lane layout of every leg
    pub fn validate(&self) -> Result<()> {
        self.legs.iter().try_for_each(Leg::validate)
    }

    /// Apply a lane edit to one leg and refresh that leg's topology
    ///
    /// A rejected edit leaves the leg as it was.
    pub fn apply_lane_operation(&mut self, leg_id: &str, operation: &LaneOperation) -> Result<()> {
        let index = self.leg_index(leg_id)?;
        let angles = self.leg_angles();
        let leg = &mut self.legs[index.0];

        lane_operation::apply(leg, operation)?;
        leg.calculate_turns(&angles);
        leg.refresh_output_legs();
        info!(
            "Intersection {}: applied {:?} on leg {}",
            self.id, operation, leg_id
        );
        Ok(())
    }

    pub fn all_signal_groups(&self) -> impl Iterator<Item = &SignalGroup> {
        self.legs.iter().flat_map(|leg| leg.signal_groups())
    }

    pub fn all_detectors(&self) -> impl Iterator<Item = &Detector> {
        self.all_signal_groups()
            .flat_map(|signal_group| signal_group.detectors())
    }

    pub fn programs(&self) -> &[SignalProgram] {
        &self.programs
    }

    pub fn program_ids(&self) -> Vec<&str> {
        self.programs
            .iter()
            .map(|program| program.program_id.as_str())
            .collect()
    }

    pub fn program(&self, id: ProgramId) -> Result<&SignalProgram> {
        self.programs
            .iter()
            .find(|program| program.id == id)
            .ok_or_else(|| JunctionError::ElementNotFound(format!("Signal program {}", id)))
    }

    pub fn selected_program(&self) -> Option<ProgramId> {
        self.selected_program
    }

    pub fn select_program(&mut self, id: ProgramId) -> Result<()> {
        self.program(id)?;
        self.selected_program = Some(id);
        Ok(())
    }

    /// Smallest leg x coordinate, truncated to whole units
    pub fn most_left_x(&self) -> Option<i64> {
        self.legs
            .iter()
            .map(|leg| leg.coordinates().x().trunc() as i64)
            .min()
    }

    /// Smallest leg y coordinate, truncated to whole units
    pub fn most_down_y(&self) -> Option<i64> {
        self.legs
            .iter()
            .map(|leg| leg.coordinates().y().trunc() as i64)
            .min()
    }

    /// Sequences of a program, one entry per controlled lane connection
    ///
    /// A signal group normally contributes one entry per connection of its
    /// lanes. If it serves more movements than there are legs, it
    /// contributes one entry per other leg instead.
    pub fn expanded_sequences(&self, program: ProgramId) -> Result<Vec<&Sequence>> {
        let leg_count = self.legs.len();
        let mut sequences = Vec::new();
        for signal_group in self.all_signal_groups() {
            let lane_connections: usize = signal_group
                .lanes()
                .iter()
                .map(|lane| lane.directions().connections_count())
                .sum();
            let repetitions = if signal_group.directions().connections_count() > leg_count {
                leg_count.saturating_sub(1)
            } else {
                lane_connections
            };

            let sequence = signal_group.sequence(program)?;
            sequences.extend(std::iter::repeat(sequence).take(repetitions));
        }
        Ok(sequences)
    }

    /// Compress a program's sequences and store the phases on the program
    pub fn compress_program<R: StateRenderer>(
        &mut self,
        program: ProgramId,
        compressor: &PhaseCompressor<'_, R>,
    ) -> Result<Compression> {
        let duration = self.program(program)?.duration;
        let compression = compressor.compress(&self.expanded_sequences(program)?, duration)?;

        if let Some(start) = compression.open_phase_start {
            debug!(
                "Intersection {} program {}: phase from tick {} to {} left open",
                self.id, program, start, duration
            );
        }
        if let Some(stored) = self.programs.iter_mut().find(|stored| stored.id == program) {
            stored.timed_phases = compression.phases.clone();
        }
        Ok(compression)
    }
}

/// Order legs by scanning angles upward from 180°, wrapping at 360°
///
/// Only the first leg found at each angle is kept.
fn sort_legs_by_angle(id: IntersectionId, legs: Vec<Leg>) -> Vec<Leg> {
    let mut remaining: Vec<Option<Leg>> = legs.into_iter().map(Some).collect();
    let mut sorted = Vec::with_capacity(remaining.len());

    for step in 0..FULL_TURN {
        let angle = (LEG_ORDER_START + step) % FULL_TURN;
        let found = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|leg| leg.angle().value() == angle))
            .and_then(Option::take);
        if let Some(mut leg) = found {
            leg.set_index(LegIndex(sorted.len()));
            sorted.push(leg);
        }
    }

    for dropped in remaining.into_iter().flatten() {
        warn!(
            "Intersection {}: leg {} shares angle {} with another leg and was dropped",
            id,
            dropped.id(),
            dropped.angle()
        );
    }
    sorted
}

fn directions_from_legs(legs: &[Leg]) -> Directions {
    let mut directions = Directions::NONE;
    for leg in legs {
        let angle = leg.angle();
        if angle.value() >= 315 || angle.value() <= 45 {
            directions.back = true;
        } else if angle.within(45, 135) {
            directions.left = true;
        } else if angle.within(135, 225) {
            directions.straight = true;
        } else {
            directions.back = true;
        }
    }
    directions
}
