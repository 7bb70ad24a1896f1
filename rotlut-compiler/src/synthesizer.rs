//! Exact compilation of a function into a multi-controlled rotation table

use rotlut_core::{cost, ControlSet, Result, RotationTable, SynthError};

/// Largest register the synthesizer accepts
///
/// Compilation and the exhaustive error scan both enumerate all `2^n` basis
/// states as `u64` bitmasks, so the register must leave at least one spare
/// bit. In practice the `O(3^n)` transform keeps useful registers far
/// smaller.
pub const MAX_REGISTER_SIZE: usize = 63;

/// Compiles a real-valued function into multi-controlled rotations
///
/// Each qubit `i` of the register carries a fixed weight, so a basis state
/// (a [`ControlSet`] of the qubits that are set) encodes the input value
/// `Σ weight[i]`. Compilation produces a [`RotationTable`] whose rotations,
/// summed over the control sets contained in a basis state, reproduce the
/// target function at that state's input value exactly.
///
/// The synthesizer owns one current table at a time. It starts exact;
/// approximation passes replace it with a cheaper table and flag it, and any
/// later approximation first recompiles the exact table so that successive
/// passes are independent of each other.
///
/// # Example
/// ```
/// use rotlut_compiler::RotationSynthesizer;
/// use rotlut_core::ControlSet;
///
/// let synth = RotationSynthesizer::new(vec![0.5, 0.25], |v| 2.0 * v)?;
/// let state = ControlSet::from_indices([0, 1])?;
/// assert_eq!(synth.evaluate(state), 1.5);
/// # Ok::<(), rotlut_core::SynthError>(())
/// ```
pub struct RotationSynthesizer {
    weights: Vec<f64>,
    function: Box<dyn Fn(f64) -> f64 + Send + Sync>,
    register: ControlSet,
    table: RotationTable,
    toffoli_count: u64,
    ancilla_count: usize,
    approximated: bool,
}

impl std::fmt::Debug for RotationSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationSynthesizer")
            .field("weights", &self.weights)
            .field("register", &self.register)
            .field("table", &self.table)
            .field("toffoli_count", &self.toffoli_count)
            .field("ancilla_count", &self.ancilla_count)
            .field("approximated", &self.approximated)
            .finish_non_exhaustive()
    }
}

impl RotationSynthesizer {
    /// Build a synthesizer and compile the exact table
    ///
    /// `weights[i]` is the value qubit `i` contributes to the input when
    /// set. The target function must be pure and finite over the reachable
    /// input values.
    ///
    /// # Errors
    /// - [`SynthError::RegisterTooLarge`] if more than
    ///   [`MAX_REGISTER_SIZE`] weights are given
    /// - [`SynthError::NonFiniteRotation`] if the target function returns
    ///   NaN or an infinity at any reachable input value
    pub fn new(
        weights: Vec<f64>,
        function: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Result<Self> {
        if weights.len() > MAX_REGISTER_SIZE {
            return Err(SynthError::register_too_large(
                weights.len(),
                MAX_REGISTER_SIZE,
            ));
        }
        let register = ControlSet::full(weights.len());
        let mut synthesizer = Self {
            weights,
            function: Box::new(function),
            register,
            table: RotationTable::new(),
            toffoli_count: 0,
            ancilla_count: 0,
            approximated: false,
        };
        synthesizer.compile()?;
        Ok(synthesizer)
    }

    /// Number of qubits in the register
    pub fn register_size(&self) -> usize {
        self.weights.len()
    }

    /// Per-qubit input weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The current rotation table (exact or approximate)
    pub fn table(&self) -> &RotationTable {
        &self.table
    }

    /// Total Toffoli cost of the current table
    pub fn toffoli_count(&self) -> u64 {
        self.toffoli_count
    }

    /// Peak ancilla requirement of the current table
    pub fn ancilla_count(&self) -> usize {
        self.ancilla_count
    }

    /// Whether the current table is an approximation rather than the exact
    /// compilation
    pub fn is_approximated(&self) -> bool {
        self.approximated
    }

    /// The input value a basis state encodes
    ///
    /// Indices outside the register are ignored.
    pub fn input_value(&self, state: ControlSet) -> f64 {
        (state & self.register)
            .indices()
            .map(|index| self.weights[index])
            .sum()
    }

    /// The value the current table reconstructs at a basis state
    ///
    /// With the exact table this equals the target function at the state's
    /// input value; with an approximate table it differs by at most the sum
    /// of the discarded rotation magnitudes. Indices outside the register
    /// are ignored.
    pub fn evaluate(&self, state: ControlSet) -> f64 {
        self.table.sum_within(state & self.register)
    }

    /// Rebuild the exact table, discarding any approximation
    pub fn recompile(&mut self) -> Result<()> {
        self.compile()
    }

    /// Compile the exact table with a Möbius transform over the subset
    /// lattice.
    ///
    /// Every subset starts at the raw lookup value `f(input_value(S))`; the
    /// transform then folds each subset's final angle out of all of its
    /// strict supersets, leaving `angle[S] = Σ_{T⊆S} (-1)^{|S|-|T|}
    /// f(input_value(T))`. Masks are visited in increasing numeric order, so
    /// every proper submask is final before its supersets are reduced. The
    /// submask walk makes this O(3^n) over all subset pairs.
    pub(crate) fn compile(&mut self) -> Result<()> {
        let subset_count = 1usize << self.register_size();
        let mut angles = vec![0.0f64; subset_count];
        for bits in 0..subset_count as u64 {
            let input_value = self.input_value(ControlSet::from_bits(bits));
            let angle = (self.function)(input_value);
            if !angle.is_finite() {
                return Err(SynthError::NonFiniteRotation { input_value });
            }
            angles[bits as usize] = angle;
        }

        for bits in 1..subset_count as u64 {
            let mut folded = angles[0];
            let mut sub = (bits - 1) & bits;
            while sub != 0 {
                folded += angles[sub as usize];
                sub = (sub - 1) & bits;
            }
            angles[bits as usize] -= folded;
        }

        let mut table = RotationTable::with_capacity(subset_count);
        for (bits, angle) in angles.into_iter().enumerate() {
            table.set_angle(ControlSet::from_bits(bits as u64), angle);
        }
        self.table = table;
        self.approximated = false;
        self.refresh_gate_counts();
        Ok(())
    }

    /// Replace the current table with an approximation and flag it
    pub(crate) fn install_approximation(&mut self, table: RotationTable) {
        self.table = table;
        self.approximated = true;
        self.refresh_gate_counts();
    }

    /// Target function at a raw input value
    pub(crate) fn target(&self, input_value: f64) -> f64 {
        (self.function)(input_value)
    }

    fn refresh_gate_counts(&mut self) {
        self.toffoli_count = cost::table_toffoli_cost(&self.table);
        self.ancilla_count = cost::table_ancilla_count(&self.table);
    }
}
