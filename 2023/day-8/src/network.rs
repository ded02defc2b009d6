use std::collections::HashMap;

use miette::*;
use nom::{
    bytes::complete::tag,
    character::complete::{alphanumeric1, line_ending, multispace1, one_of},
    combinator::{all_consuming, map},
    multi::{many1, separated_list1},
    sequence::{delimited, separated_pair},
    IResult,
};
use state_cycle::{detect, Simulation, WalkerPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// `AAA = (BBB, CCC)`
type NodeLine<'a> = (&'a str, (&'a str, &'a str));

fn turns(input: &str) -> IResult<&str, Vec<Turn>> {
    many1(map(one_of("LR"), |c| match c {
        'L' => Turn::Left,
        _ => Turn::Right,
    }))(input)
}

fn node_line(input: &str) -> IResult<&str, NodeLine<'_>> {
    separated_pair(
        alphanumeric1,
        tag(" = "),
        delimited(
            tag("("),
            separated_pair(alphanumeric1, tag(", "), alphanumeric1),
            tag(")"),
        ),
    )(input)
}

fn document(input: &str) -> IResult<&str, (Vec<Turn>, Vec<NodeLine<'_>>)> {
    separated_pair(turns, multispace1, separated_list1(line_ending, node_line))(input)
}

/// A walker's position: node id and index into the turn sequence.
pub type Position = (usize, usize);

/// The node network, with names interned to ids in declaration order.
#[derive(Debug)]
pub struct Network {
    turns: Vec<Turn>,
    names: Vec<String>,
    ids: HashMap<String, usize>,
    /// `[left, right]` neighbour ids per node.
    links: Vec<[usize; 2]>,
}

impl Network {
    /// Parses the document and resolves every neighbour reference, so that
    /// walking the network afterwards can never hit an unknown node.
    pub fn parse(input: &str) -> Result<Self> {
        let (_, (turns, lines)) = all_consuming(document)(input.trim())
            .map_err(|e| miette!("Parse failed: {:?}", e))?;

        let mut ids = HashMap::with_capacity(lines.len());
        for (id, &(name, _)) in lines.iter().enumerate() {
            if ids.insert(name.to_string(), id).is_some() {
                return Err(miette!("Node '{}' is declared twice", name));
            }
        }

        let resolve = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| miette!("Node '{}' is referenced but never declared", name))
        };
        let links = lines
            .iter()
            .map(|&(_, (left, right))| Ok([resolve(left)?, resolve(right)?]))
            .collect::<Result<Vec<_>>>()?;
        let names = lines.iter().map(|&(name, _)| name.to_string()).collect();

        Ok(Self {
            turns,
            names,
            ids,
            links,
        })
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }

    /// Follows the turns from `start` until a `(node, turn)` pair repeats.
    pub fn walk(&self, start: usize) -> Result<WalkerPattern<Position>> {
        // There are only nodes * turns distinct positions.
        let max_steps = self.names.len() * self.turns.len();
        let cycle = detect(self, (start, 0), max_steps)?;
        Ok(cycle.into())
    }
}

impl Simulation for Network {
    type State = Position;
    type Key = Position;

    fn encode(&self, state: &Position) -> Position {
        *state
    }

    fn step(&self, &(node, turn): &Position) -> Position {
        let [left, right] = self.links[node];
        let next = match self.turns[turn] {
            Turn::Left => left,
            Turn::Right => right,
        };
        (next, (turn + 1) % self.turns.len())
    }
}
