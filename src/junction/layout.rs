//! Authored layout files and the builder turning them into a situation

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

use super::angle::Angle;
use super::config::Config;
use super::coordinates::Coordinates;
use super::directions::Directions;
use super::intersection::Intersection;
use super::lane::Lane;
use super::leg::Leg;
use super::sequence::Sequence;
use super::signal_group::{Detector, SignalGroup, Signalisation};
use super::signal_program::{ProgramPhase, SignalProgram};
use super::situation::Situation;
use super::types::{GridPosition, IntersectionId, LaneId, ProgramId, SignalCode, SignalGroupId};

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutFile {
    pub intersections: Vec<IntersectionLayout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntersectionLayout {
    pub id: IntersectionId,
    #[serde(default)]
    pub grid: Option<GridPosition>,
    #[serde(default)]
    pub angle: i64,
    pub legs: Vec<LegLayout>,
    #[serde(default)]
    pub programs: Vec<ProgramLayout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegLayout {
    pub id: String,
    pub angle: i64,
    /// Derived from the intersection centre and leg length when absent
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    #[serde(default)]
    pub signal_groups: Vec<SignalGroupLayout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalGroupLayout {
    pub id: SignalGroupId,
    #[serde(default)]
    pub transition_green_red: u32,
    #[serde(default)]
    pub transition_red_green: u32,
    pub lanes: Vec<Directions>,
    #[serde(default)]
    pub detectors: Vec<DetectorLayout>,
    #[serde(default)]
    pub sequences: Vec<SequenceLayout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorLayout {
    pub name: String,
    pub running_gap: u32,
    pub demand_reset_threshold: u32,
    #[serde(default)]
    pub lanes: Vec<LaneId>,
}

/// Signal codes of one program; `null` leaves a tick unset
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceLayout {
    pub program: ProgramId,
    pub signals: Vec<Option<SignalCode>>,
    /// Program phase id active at each tick
    #[serde(default)]
    pub phases: Vec<Option<u32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramLayout {
    pub id: ProgramId,
    pub program_id: String,
    pub duration: usize,
    #[serde(default)]
    pub activation_offset: u32,
    #[serde(default)]
    pub phases: Vec<ProgramPhase>,
}

/// Read and build a situation from a JSON layout file
pub fn load_situation(path: &Path, config: &Config) -> Result<Situation> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    parse_situation(&data, config).with_context(|| format!("Invalid layout {}", path.display()))
}

/// Build a situation from JSON layout text
pub fn parse_situation(data: &str, config: &Config) -> Result<Situation> {
    let layout: LayoutFile = serde_json::from_str(data).context("Layout is not valid JSON")?;
    layout.build(config)
}

impl LayoutFile {
    pub fn build(&self, config: &Config) -> Result<Situation> {
        let mut situation = Situation::new(config.distance_between_intersections);
        for layout in &self.intersections {
            let intersection = layout
                .build(&situation, config)
                .with_context(|| format!("Intersection {}", layout.id))?;
            situation.add_intersection(intersection)?;
        }
        situation.connect_intersections();
        info!(
            "Loaded {} intersections",
            situation.intersections().len()
        );
        Ok(situation)
    }
}

impl IntersectionLayout {
    fn build(&self, situation: &Situation, config: &Config) -> Result<Intersection> {
        let grid = self.grid.unwrap_or_default();
        let centre = situation.grid_to_coordinates(self.grid);
        let programs: Vec<SignalProgram> = self.programs.iter().map(ProgramLayout::build).collect();

        let legs = self
            .legs
            .iter()
            .map(|leg| {
                leg.build(&centre, &programs, config)
                    .with_context(|| format!("Leg {}", leg.id))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut intersection = Intersection::new(
            self.id,
            centre,
            grid,
            Angle::new(self.angle)?,
            legs,
            programs,
        );
        if intersection.legs().len() != self.legs.len() {
            bail!("Two legs of intersection {} share an angle", self.id);
        }
        intersection.calculate_turns();
        intersection.validate()?;
        Ok(intersection)
    }
}

impl LegLayout {
    fn build(&self, centre: &Coordinates, programs: &[SignalProgram], config: &Config) -> Result<Leg> {
        let angle = Angle::new(self.angle)?;
        let coordinates = match self.coordinates {
            Some([x, y]) => Coordinates::new(x, y),
            None => centre.move_by_distance(angle, config.leg_length),
        };
        let mut leg = Leg::new(self.id.clone(), angle, coordinates);
        let edge = leg.incoming_edge();

        for group in &self.signal_groups {
            let mut signal_group = SignalGroup::new(
                group.id,
                Signalisation {
                    green_to_red: group.transition_green_red,
                    red_to_green: group.transition_red_green,
                },
            );
            for directions in &group.lanes {
                let lane = Lane::new(signal_group.next_lane_id(), *directions, edge.clone());
                signal_group.add_lane(lane);
            }
            for detector in &group.detectors {
                let mut built =
                    Detector::new(&detector.name, detector.running_gap, detector.demand_reset_threshold);
                for lane in &detector.lanes {
                    built.add_lane_used(*lane);
                }
                signal_group.add_detector(built);
            }
            for sequence in &group.sequences {
                let program = programs
                    .iter()
                    .find(|program| program.id == sequence.program)
                    .with_context(|| {
                        format!(
                            "Signal group {} references unknown program {}",
                            group.id, sequence.program
                        )
                    })?;
                let built = sequence.build(program)?;
                if !built.is_complete() {
                    warn!(
                        "Signal group {} of leg {} has unset ticks in program {}",
                        group.id, self.id, program.id
                    );
                }
                signal_group.insert_sequence(program.id, built);
            }
            leg.add_signal_group(signal_group);
        }
        Ok(leg)
    }
}

impl SequenceLayout {
    fn build(&self, program: &SignalProgram) -> Result<Sequence> {
        let mut sequence = Sequence::new(program.duration);
        for (tick, code) in self.signals.iter().enumerate().take(program.duration) {
            let Some(code) = code else {
                continue;
            };
            let phase = match self.phases.get(tick).copied().flatten() {
                Some(phase_id) => Some(*program.phase(phase_id).with_context(|| {
                    format!("Program {} has no phase {}", program.id, phase_id)
                })?),
                None => None,
            };
            sequence.set(tick, *code, phase);
        }
        Ok(sequence)
    }
}

impl ProgramLayout {
    fn build(&self) -> SignalProgram {
        let mut program = SignalProgram::new(self.id, self.program_id.clone(), self.duration);
        program.activation_offset = self.activation_offset;
        program.phases = self.phases.clone();
        program
    }
}
