//! Weighted move selector with reinforcement and board rotation.

use std::{
    collections::BTreeMap,
    fmt,
    io::{Read, Write},
    path::Path,
    str::FromStr,
};

use log::{debug, error, warn};
use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Result,
    config::SelectorConfig,
    error::Error,
    persistence,
    types::{MoveId, Rotation},
    utils::{entropy_from_counts, weighted_sample},
};

/// A pool of candidate moves weighted by how often they were reinforced.
///
/// Drawing picks a move with probability proportional to its weight and
/// holds it as the pending draw until [`confirm_good`](Self::confirm_good)
/// or [`confirm_bad`](Self::confirm_bad) resolves it. Only one draw may be
/// pending at a time.
///
/// The history log is kept separately from the weights and is only used for
/// persistence.
///
/// # Examples
///
/// ```
/// use movepool::{Rotation, SelectorConfig, WeightedStepSelector};
///
/// let mut pool = WeightedStepSelector::with_config(SelectorConfig::new().with_seed(1));
/// pool.add_step(4)?;
/// let step = pool.draw(Rotation::Deg90)?;
/// assert_eq!(step.value(), 4);
/// pool.confirm_good()?;
/// assert_eq!(pool.total_weight(), 2);
/// # Ok::<(), movepool::Error>(())
/// ```
pub struct WeightedStepSelector<R: Rng = StdRng> {
    /// Move -> weight, iterated in ascending move order
    weights: BTreeMap<MoveId, u32>,
    /// Ordered move log for persistence
    history: Vec<i32>,
    /// Un-rotated move awaiting feedback
    pending: Option<MoveId>,
    warn_on_unresolved: bool,
    rng: R,
}

impl WeightedStepSelector<StdRng> {
    /// Create an empty selector seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_config(SelectorConfig::default())
    }

    /// Create an empty selector from a configuration.
    pub fn with_config(config: SelectorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(random()),
        };
        Self::with_rng_and_config(rng, config)
    }

    /// Create a selector whose weights come from whitespace-delimited moves.
    ///
    /// Every token adds one to the weight of its move. Tokens outside 0-8 are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseStep`] if a token is not an integer.
    pub fn from_steps(steps: &str) -> Result<Self> {
        Self::from_steps_with_config(steps, SelectorConfig::default())
    }

    /// Like [`from_steps`](Self::from_steps), seeded from `config`.
    pub fn from_steps_with_config(steps: &str, config: SelectorConfig) -> Result<Self> {
        let mut pool = Self::with_config(config);
        pool.add_steps(steps)?;
        Ok(pool)
    }

    /// Create a selector with the given history log and no weights.
    pub fn from_history(history: Vec<i32>) -> Self {
        Self::from_history_with_config(history, SelectorConfig::default())
    }

    /// Like [`from_history`](Self::from_history), seeded from `config`.
    pub fn from_history_with_config(history: Vec<i32>, config: SelectorConfig) -> Self {
        let mut pool = Self::with_config(config);
        pool.history = history;
        pool
    }
}

impl Default for WeightedStepSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for WeightedStepSelector<StdRng> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_steps(s)
    }
}

impl<R: Rng> WeightedStepSelector<R> {
    /// Create an empty selector drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::with_rng_and_config(rng, SelectorConfig::default())
    }

    /// Create a selector drawing from `rng` with weights parsed from `steps`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseStep`] if a token is not an integer.
    pub fn from_steps_with_rng(steps: &str, rng: R) -> Result<Self> {
        let mut pool = Self::with_rng(rng);
        pool.add_steps(steps)?;
        Ok(pool)
    }

    /// Create a selector drawing from `rng` with the given history log.
    pub fn from_history_with_rng(history: Vec<i32>, rng: R) -> Self {
        let mut pool = Self::with_rng(rng);
        pool.history = history;
        pool
    }

    /// Create an empty selector drawing from `rng`; the config seed is ignored.
    pub fn with_rng_and_config(rng: R, config: SelectorConfig) -> Self {
        Self {
            weights: BTreeMap::new(),
            history: Vec::new(),
            pending: None,
            warn_on_unresolved: config.warn_on_unresolved,
            rng,
        }
    }

    /// Add one to the weight of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if `value` is outside 0-8; the pool is
    /// left unchanged.
    pub fn add_step(&mut self, value: i32) -> Result<()> {
        let id = MoveId::new(value).inspect_err(|e| error!("add_step: {e}"))?;
        self.reinforce(id);
        Ok(())
    }

    /// Parse all tokens first, then add each; out-of-range moves are logged
    /// by `add_step` and skipped.
    fn add_steps(&mut self, steps: &str) -> Result<()> {
        let values = persistence::parse_steps(steps)?;
        for value in values {
            let _ = self.add_step(value);
        }
        Ok(())
    }

    fn reinforce(&mut self, id: MoveId) {
        let weight = self.weights.entry(id).or_insert(0);
        *weight = weight.saturating_add(1);
    }

    /// Append `value` to the history log.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if `value` is outside 0-8.
    pub fn record(&mut self, value: i32) -> Result<()> {
        let id = MoveId::new(value).inspect_err(|e| error!("record: {e}"))?;
        self.history.push(id.into());
        Ok(())
    }

    /// Draw a move with probability proportional to its weight.
    ///
    /// The drawn move is kept as the pending draw in the learned orientation;
    /// the returned move is mapped through `rotation`. Weights are not changed.
    ///
    /// # Errors
    ///
    /// - [`Error::DrawPending`] if the previous draw has not been confirmed
    /// - [`Error::EmptyPool`] if the total weight is zero
    pub fn draw(&mut self, rotation: Rotation) -> Result<MoveId> {
        if let Some(pending) = self.pending {
            let err = Error::DrawPending {
                pending: pending.value(),
            };
            error!("draw: {err}");
            return Err(err);
        }

        let items: Vec<(MoveId, u32)> = self.weights().collect();
        let drawn = weighted_sample(&mut self.rng, &items).ok_or_else(|| {
            error!("draw: {}", Error::EmptyPool);
            Error::EmptyPool
        })?;

        self.pending = Some(drawn);
        let rotated = rotation.apply(drawn);
        debug!(
            "drew {drawn} of total weight {}, returning {rotated} at {rotation}",
            self.total_weight()
        );
        Ok(rotated)
    }

    /// Draw with the rotation given in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRotation`] for anything other than 0, 90, 180
    /// or 270, without drawing. Otherwise fails like [`draw`](Self::draw).
    pub fn draw_degrees(&mut self, degrees: u16) -> Result<MoveId> {
        let rotation = Rotation::from_degrees(degrees).inspect_err(|e| error!("draw: {e}"))?;
        self.draw(rotation)
    }

    /// Reward the pending draw: its weight goes up by one and the draw is cleared.
    ///
    /// Returns the reinforced move in the learned orientation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingDraw`] if nothing was drawn.
    pub fn confirm_good(&mut self) -> Result<MoveId> {
        let id = self.take_pending("confirm_good")?;
        self.reinforce(id);
        debug!("reinforced {id}, weight now {}", self.weight(id));
        Ok(id)
    }

    /// Discard the pending draw without touching its weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingDraw`] if nothing was drawn.
    pub fn confirm_bad(&mut self) -> Result<MoveId> {
        let id = self.take_pending("confirm_bad")?;
        debug!("discarded {id}");
        Ok(id)
    }

    fn take_pending(&mut self, operation: &str) -> Result<MoveId> {
        self.pending.take().ok_or_else(|| {
            error!("{operation}: {}", Error::NoPendingDraw);
            Error::NoPendingDraw
        })
    }

    /// Weight of `id`, zero if it was never added.
    pub fn weight(&self, id: MoveId) -> u32 {
        self.weights.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.weights.values().map(|&w| u64::from(w)).sum()
    }

    /// Iterate over `(move, weight)` pairs in ascending move order.
    pub fn weights(&self) -> impl Iterator<Item = (MoveId, u32)> + '_ {
        self.weights.iter().map(|(&id, &weight)| (id, weight))
    }

    /// True when no move carries any weight.
    pub fn is_empty(&self) -> bool {
        self.total_weight() == 0
    }

    /// The pending draw in the learned orientation, if any.
    pub fn pending(&self) -> Option<MoveId> {
        self.pending
    }

    /// The history log.
    pub fn history(&self) -> &[i32] {
        &self.history
    }

    /// Shannon entropy of the weight distribution.
    pub fn entropy(&self) -> f64 {
        entropy_from_counts(self.weights.values().copied())
    }

    /// Append the history log as one text line to `path`.
    pub fn save_text(&self, path: &Path) -> Result<()> {
        persistence::append_text_line(path, &self.history)
            .inspect_err(|e| error!("save_text: {e}"))
    }

    /// Write the history log as one binary record to `writer`.
    pub fn save_binary<W: Write>(&self, writer: &mut W) -> Result<()> {
        persistence::write_record(writer, &self.history)
            .inspect_err(|e| error!("save_binary: {e}"))
    }

    /// Read one binary record from `reader` and append it to the history log.
    ///
    /// Returns `false` if the stream was already at its end. The history is
    /// left unchanged if the record is malformed.
    pub fn load_binary<Rd: Read>(&mut self, reader: &mut Rd) -> Result<bool> {
        let Some(record) =
            persistence::read_record(reader).inspect_err(|e| error!("load_binary: {e}"))?
        else {
            debug!("no history record left to load");
            return Ok(false);
        };
        debug!("loaded {} history values", record.len());
        self.history.extend(record);
        Ok(true)
    }

    /// Print the weights and pending draw to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl<R: Rng> fmt::Display for WeightedStepSelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, weight) in self.weights() {
            write!(f, "{id}({weight}) ")?;
        }
        match self.pending {
            Some(id) => write!(f, "last({id})"),
            None => write!(f, "last(-1)"),
        }
    }
}

impl<R: Rng> fmt::Debug for WeightedStepSelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedStepSelector")
            .field("weights", &self.weights)
            .field("history", &self.history)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<R: Rng> Drop for WeightedStepSelector<R> {
    fn drop(&mut self) {
        if self.warn_on_unresolved {
            if let Some(id) = self.pending {
                warn!("selector dropped with unconfirmed draw of move {id}");
            }
        }
    }
}
