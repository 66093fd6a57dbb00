//! A walkable sequence of generated chunks
//!
//! The chain owns the chunk the player is in and the one they came from.
//! Stepping onto an exit marker generates the next chunk, places it beyond
//! the exit's edge and carves a path to its nearest door.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::data::SPAWN_MARKER;
use crate::dungeon::{Dungeon, TemplateCatalog, generate};
use crate::error::{ConfigurationError, LinkFailure};
use crate::params::GenerationParams;
use crate::rng::Seed;

use super::arrival::{Arrival, WorldPos, chunk_offset, detect_arrival};
use super::carve::{ChunkLink, LinkParams, link_chunks};

/// A chunk and where it sits in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedChunk {
    /// Position in the chain, 0 for the first chunk
    pub index: u64,
    /// World position of the chunk's cell (0, 0)
    pub origin: WorldPos,
    pub dungeon: Dungeon,
}

/// What happened when the player crossed an exit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub arrival: Arrival,
    /// Index of the chunk just entered
    pub index: u64,
    pub origin: WorldPos,
    pub link: Result<ChunkLink, LinkFailure>,
}

#[derive(Debug, Clone)]
pub struct ChunkChain {
    params: GenerationParams,
    catalog: TemplateCatalog,
    link: LinkParams,
    current: PlacedChunk,
    previous: Option<PlacedChunk>,
    /// Chunks generated ahead of time, by index
    pending: BTreeMap<u64, Dungeon>,
    spawn: WorldPos,
}

impl ChunkChain {
    /// Generate the first chunk and spawn the player in it.
    pub fn new(params: GenerationParams, catalog: TemplateCatalog) -> Result<Self, ConfigurationError> {
        let dungeon = generate_chunk(&params, &catalog, 0)?;
        let link = LinkParams::for_params(&params);
        let current = PlacedChunk {
            index: 0,
            origin: WorldPos::default(),
            dungeon,
        };
        let spawn = spawn_point(&current, link.tile_size);

        Ok(Self {
            params,
            catalog,
            link,
            current,
            previous: None,
            pending: BTreeMap::new(),
            spawn,
        })
    }

    /// Replace the link parameters
    pub fn with_link_params(mut self, link: LinkParams) -> Self {
        self.link = link;
        self.spawn = spawn_point(&self.current, link.tile_size);
        self
    }

    pub fn current(&self) -> &PlacedChunk {
        &self.current
    }

    pub fn previous(&self) -> Option<&PlacedChunk> {
        self.previous.as_ref()
    }

    /// Where the player starts: the first chunk's ladder, else its first floor cell
    pub fn spawn(&self) -> WorldPos {
        self.spawn
    }

    pub fn link_params(&self) -> &LinkParams {
        &self.link
    }

    /// Number of chunks generated ahead and not yet entered
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// React to the player moving to `player`.
    ///
    /// Returns `None` unless the player stands on an exit of the current
    /// chunk. A failed link does not stop the transition; it is logged and
    /// reported in the returned [`Transition`].
    pub fn advance(&mut self, player: WorldPos) -> Result<Option<Transition>, ConfigurationError> {
        let Some(arrival) = detect_arrival(
            &self.current.dungeon,
            self.current.origin,
            player,
            self.link.tile_size,
            self.link.snap_tolerance,
        ) else {
            return Ok(None);
        };

        let index = self.current.index + 1;
        let mut next = match self.pending.remove(&index) {
            Some(dungeon) => dungeon,
            None => generate_chunk(&self.params, &self.catalog, index)?,
        };

        let (dx, dy) = chunk_offset(&self.current.dungeon, arrival.direction);
        let origin = self
            .current
            .origin
            .offset(dx as f32 * self.link.tile_size, dy as f32 * self.link.tile_size);

        let link = link_chunks(
            &mut self.current.dungeon,
            &mut next,
            (arrival.x, arrival.y),
            (dx, dy),
            &self.link,
        );
        if let Err(failure) = &link {
            log::warn!("chunk {index} left unconnected: {failure}");
        }

        let entered = PlacedChunk {
            index,
            origin,
            dungeon: next,
        };
        self.previous = Some(std::mem::replace(&mut self.current, entered));
        log::info!("entered chunk {index} heading {}", arrival.direction);

        Ok(Some(Transition {
            arrival,
            index,
            origin,
            link,
        }))
    }

    /// Generate the next `count` chunks ahead of time, in parallel.
    ///
    /// Chunks already pending are skipped. The result is identical to
    /// generating them one by one as the player advances.
    pub fn pregenerate(&mut self, count: usize) -> Result<usize, ConfigurationError> {
        let first = self.current.index + 1;
        let indices: Vec<u64> = (first..first + count as u64)
            .filter(|index| !self.pending.contains_key(index))
            .collect();

        let params = &self.params;
        let catalog = &self.catalog;
        let results: Vec<_> = indices
            .par_iter()
            .map(|&index| (index, generate_chunk(params, catalog, index)))
            .collect();

        let generated = results.len();
        for (index, result) in results {
            self.pending.insert(index, result?);
        }
        log::debug!("pregenerated {generated} chunks after chunk {}", self.current.index);
        Ok(generated)
    }
}

/// Seed of the `index`-th chunk: the base seed for the first, derived after.
pub fn chunk_seed(base: &Seed, index: u64) -> Seed {
    if index == 0 { base.clone() } else { base.derive(index) }
}

fn generate_chunk(
    params: &GenerationParams,
    catalog: &TemplateCatalog,
    index: u64,
) -> Result<Dungeon, ConfigurationError> {
    generate(&params.with_seed(chunk_seed(&params.seed, index)), catalog)
}

fn spawn_point(chunk: &PlacedChunk, tile_size: f32) -> WorldPos {
    let (x, y) = chunk
        .dungeon
        .find_prop(SPAWN_MARKER)
        .or_else(|| chunk.dungeon.first_floor())
        .unwrap_or_default();
    chunk.origin.cell_center(x, y, tile_size)
}
