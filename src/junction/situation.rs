//! A situation: intersections on a grid, their connections and routes
//!
//! Neighbouring intersections are joined through their closest legs. Legs
//! left unconnected are end legs, where vehicles enter and leave the network.

use log::{debug, info};
use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;

use super::angle::Angle;
use super::coordinates::Coordinates;
use super::error::{JunctionError, Result};
use super::intersection::Intersection;
use super::leg::Leg;
use super::types::{GridDirection, GridPosition, IntersectionId};

/// A leg addressed across the whole situation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegRef {
    pub intersection: IntersectionId,
    pub leg: String,
}

impl fmt::Display for LegRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.intersection, self.leg)
    }
}

/// Two intersections joined through one leg of each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionConnection {
    pub id: String,
    pub first: LegRef,
    pub second: LegRef,
}

/// A route between two end legs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    pub from: LegRef,
    pub to: LegRef,
}

/// A route together with the edges it drives along
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRoute {
    pub flow: Flow,
    pub edges: Vec<String>,
}

/// Directed graph of edges joined by lane connections
#[derive(Default)]
pub struct LaneGraph {
    graph: DiGraph<String, ()>,
    edge_to_node: HashMap<String, NodeIndex>,
}

impl LaneGraph {
    fn node(&mut self, edge: String) -> NodeIndex {
        if let Some(node) = self.edge_to_node.get(&edge) {
            return *node;
        }
        let node = self.graph.add_node(edge.clone());
        self.edge_to_node.insert(edge, node);
        node
    }

    fn connect(&mut self, from: String, to: String) {
        let from = self.node(from);
        let to = self.node(to);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_edge(&self, edge: &str) -> bool {
        self.edge_to_node.contains_key(edge)
    }

    /// Shortest chain of edges from `from` to `to`, both included
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let start = *self.edge_to_node.get(from)?;
        let goal = *self.edge_to_node.get(to)?;

        let (_, nodes) = astar(&self.graph, start, |node| node == goal, |_| 1, |_| 0)?;
        Some(
            nodes
                .into_iter()
                .map(|node| self.graph[node].clone())
                .collect(),
        )
    }
}

/// All intersections of an edited layout
#[derive(Debug, Clone)]
pub struct Situation {
    intersections: Vec<Intersection>,
    connections: Vec<IntersectionConnection>,
    routes: Vec<Flow>,
    distance_between_intersections: f64,
}

impl Situation {
    pub fn new(distance_between_intersections: f64) -> Self {
        Self {
            intersections: Vec::new(),
            connections: Vec::new(),
            routes: Vec::new(),
            distance_between_intersections,
        }
    }

    /// Coordinates of the centre of a grid cell
    pub fn grid_to_coordinates(&self, position: Option<GridPosition>) -> Coordinates {
        position
            .map(|position| {
                Coordinates::new(
                    position.x as f64 * self.distance_between_intersections,
                    position.y as f64 * self.distance_between_intersections,
                )
            })
            .unwrap_or_default()
    }

    pub fn assert_grid_position_is_free(&self, position: GridPosition) -> Result<()> {
        match self.intersection_at(position) {
            Some(_) => Err(JunctionError::OccupiedGridPosition(position)),
            None => Ok(()),
        }
    }

    pub fn add_intersection(&mut self, intersection: Intersection) -> Result<()> {
        self.assert_grid_position_is_free(intersection.grid_position())?;
        debug!(
            "Adding intersection {} at {}",
            intersection.id(),
            intersection.grid_position()
        );
        self.intersections.push(intersection);
        Ok(())
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    pub fn intersection(&self, id: IntersectionId) -> Result<&Intersection> {
        self.intersections
            .iter()
            .find(|intersection| intersection.id() == id)
            .ok_or_else(|| JunctionError::ElementNotFound(format!("Intersection by ID: {}", id)))
    }

    pub fn intersection_mut(&mut self, id: IntersectionId) -> Result<&mut Intersection> {
        self.intersections
            .iter_mut()
            .find(|intersection| intersection.id() == id)
            .ok_or_else(|| JunctionError::ElementNotFound(format!("Intersection by ID: {}", id)))
    }

    pub fn intersection_at(&self, position: GridPosition) -> Option<&Intersection> {
        self.intersections
            .iter()
            .find(|intersection| intersection.grid_position() == position)
    }

    pub fn leg(&self, leg: &LegRef) -> Result<&Leg> {
        self.intersection(leg.intersection)?.leg(&leg.leg)
    }

    pub fn connections(&self) -> &[IntersectionConnection] {
        &self.connections
    }

    pub fn routes(&self) -> &[Flow] {
        &self.routes
    }

    /// Join neighbouring intersections and enumerate routes between end legs
    pub fn connect_intersections(&mut self) {
        for position in 0..self.intersections.len() {
            for direction in GridDirection::ALL {
                let source = &self.intersections[position];
                let Some(neighbour) =
                    self.intersection_at(source.grid_position().neighbour(direction))
                else {
                    continue;
                };
                if self.connection_exists(source.id(), neighbour.id()) {
                    continue;
                }
                let Some(connection) = connect_by_distance(source, neighbour, direction) else {
                    continue;
                };
                // a leg joins at most one other intersection
                if self.leg_is_connected(&connection.first) || self.leg_is_connected(&connection.second)
                {
                    continue;
                }
                debug!(
                    "Connecting {} and {} with {}",
                    connection.first, connection.second, connection.id
                );
                self.connections.push(connection);
            }
        }

        self.routes = self.retrieve_routes();
        info!(
            "{} connections, {} routes between end legs",
            self.connections.len(),
            self.routes.len()
        );
    }

    /// Legs not taking part in any connection
    pub fn end_legs(&self) -> Vec<LegRef> {
        self.intersections
            .iter()
            .flat_map(|intersection| {
                intersection.legs().iter().map(|leg| LegRef {
                    intersection: intersection.id(),
                    leg: leg.id().to_string(),
                })
            })
            .filter(|leg| !self.leg_is_connected(leg))
            .collect()
    }

    /// Graph of edges joined by lane output legs and intersection connections
    pub fn lane_graph(&self) -> LaneGraph {
        let mut graph = LaneGraph::default();
        for intersection in &self.intersections {
            for leg in intersection.legs() {
                for lane in leg.all_lanes() {
                    for output in lane.output_legs() {
                        if let Some(output) = intersection.leg_at(*output) {
                            graph.connect(leg.incoming_edge(), output.outgoing_edge());
                        }
                    }
                }
            }
        }

        for connection in &self.connections {
            if let (Ok(first), Ok(second)) = (self.leg(&connection.first), self.leg(&connection.second)) {
                graph.connect(first.outgoing_edge(), second.incoming_edge());
                graph.connect(second.outgoing_edge(), first.incoming_edge());
            }
        }
        graph
    }

    /// Routes a vehicle can actually drive, with their edge chains
    pub fn valid_routes(&self) -> Vec<ValidRoute> {
        let graph = self.lane_graph();
        self.routes
            .iter()
            .filter_map(|flow| {
                let from = self.leg(&flow.from).ok()?.incoming_edge();
                let to = self.leg(&flow.to).ok()?.outgoing_edge();
                graph.find_path(&from, &to).map(|edges| ValidRoute {
                    flow: flow.clone(),
                    edges,
                })
            })
            .collect()
    }

    /// Like [`Self::valid_routes`] but an empty result is an error
    pub fn require_valid_routes(&self) -> Result<Vec<ValidRoute>> {
        let routes = self.valid_routes();
        if routes.is_empty() {
            return Err(JunctionError::NoValidRoutes);
        }
        Ok(routes)
    }

    fn retrieve_routes(&self) -> Vec<Flow> {
        let end_legs = self.end_legs();
        let mut routes = Vec::new();
        for from in &end_legs {
            for to in &end_legs {
                if from != to {
                    routes.push(Flow {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        routes
    }

    fn connection_exists(&self, first: IntersectionId, second: IntersectionId) -> bool {
        self.connections.iter().any(|connection| {
            let ends = (connection.first.intersection, connection.second.intersection);
            ends == (first, second) || ends == (second, first)
        })
    }

    fn leg_is_connected(&self, leg: &LegRef) -> bool {
        self.connections
            .iter()
            .any(|connection| connection.first == *leg || connection.second == *leg)
    }
}

/// Connect two intersections through the legs closest to their midpoint
///
/// Returns `None` if those legs do not face each other for `direction`.
fn connect_by_distance(
    first: &Intersection,
    second: &Intersection,
    direction: GridDirection,
) -> Option<IntersectionConnection> {
    let middle = first.coordinates().midpoint(second.coordinates());
    let first_leg = closest_leg(first, &middle)?;
    let second_leg = closest_leg(second, &middle)?;

    if !is_allowed_connection_angle(direction, first_leg, second_leg) {
        debug!(
            "Legs {} and {} do not face each other going {:?}",
            first_leg.id(),
            second_leg.id(),
            direction
        );
        return None;
    }

    Some(IntersectionConnection {
        id: format!("con{}-{}", first.id(), second.id()),
        first: LegRef {
            intersection: first.id(),
            leg: first_leg.id().to_string(),
        },
        second: LegRef {
            intersection: second.id(),
            leg: second_leg.id().to_string(),
        },
    })
}

fn closest_leg<'a>(intersection: &'a Intersection, target: &Coordinates) -> Option<&'a Leg> {
    intersection
        .legs()
        .iter()
        .min_by_key(|leg| OrderedFloat(leg.coordinates().distance(target)))
}

fn is_allowed_connection_angle(direction: GridDirection, first: &Leg, second: &Leg) -> bool {
    let (a1, a2) = (first.angle(), second.angle());
    let towards_bottom = |angle: Angle| angle.value() >= 315 || angle.value() <= 45;
    match direction {
        GridDirection::Bottom => towards_bottom(a1) && a2.within(135, 225),
        GridDirection::Top => towards_bottom(a2) && a1.within(135, 225),
        GridDirection::Left => a1.within(45, 135) && a2.within(225, 315),
        GridDirection::Right => a2.within(45, 135) && a1.within(225, 315),
    }
}
