//! Obstacle sprite bookkeeping
//!
//! Maps obstacle ids to backend handles. Each `sync` creates handles for new
//! obstacles, moves existing ones and releases handles whose obstacle is gone.

use std::collections::BTreeMap;

use super::view::ObstacleView;

/// Drawing backend for obstacle pairs
pub trait SpriteCanvas {
    type Handle;

    /// Create the visuals for a new obstacle (None if the backend failed)
    fn create(&mut self, obstacle: &ObstacleView) -> Option<Self::Handle>;

    /// Move existing visuals
    fn update(&mut self, handle: &Self::Handle, obstacle: &ObstacleView);

    /// Release visuals for good
    fn remove(&mut self, handle: Self::Handle);
}

/// Live handles keyed by obstacle id
#[derive(Debug)]
pub struct SpriteSync<H> {
    handles: BTreeMap<u32, H>,
}

impl<H> Default for SpriteSync<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SpriteSync<H> {
    pub fn new() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }

    /// Bring the handle set in line with `obstacles`
    pub fn sync<C>(&mut self, canvas: &mut C, obstacles: &[ObstacleView])
    where
        C: SpriteCanvas<Handle = H>,
    {
        let stale: Vec<u32> = self
            .handles
            .keys()
            .copied()
            .filter(|id| !obstacles.iter().any(|o| o.id == *id))
            .collect();
        for id in stale {
            if let Some(handle) = self.handles.remove(&id) {
                canvas.remove(handle);
            }
        }

        for obstacle in obstacles {
            match self.handles.get(&obstacle.id) {
                Some(handle) => canvas.update(handle, obstacle),
                None => {
                    if let Some(handle) = canvas.create(obstacle) {
                        self.handles.insert(obstacle.id, handle);
                    }
                }
            }
        }
    }

    /// Release every handle (restart)
    pub fn clear<C>(&mut self, canvas: &mut C)
    where
        C: SpriteCanvas<Handle = H>,
    {
        for (_, handle) in std::mem::take(&mut self.handles) {
            canvas.remove(handle);
        }
    }
}
