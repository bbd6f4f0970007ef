//! Ordered operating-point assignment.
//!
//! [`ParameterSet`] maps parameter names to their operating-point values.
//! Insertion order is significant: it is the positional argument order used
//! when calling a target function.

/// Ordered mapping from parameter name to operating-point value.
///
/// Re-inserting an existing name overwrites its value without moving it,
/// so the positional order is fixed by first insertion.
///
/// # Examples
///
/// ```rust
/// use sensitivity_core::types::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.insert("x", 1.0);
/// params.insert("y", 2.0);
/// params.insert("x", 5.0);
///
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["x", "y"]);
/// assert_eq!(params.values(), vec![5.0, 2.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, f64)>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty parameter set with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts or overwrites a parameter value.
    ///
    /// # Returns
    ///
    /// The previous value if the parameter was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value of a parameter.
    #[inline]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Returns the positional index of a parameter.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Returns true if the parameter is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Iterates over parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the operating-point values as a positional argument vector.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// Returns the positional argument vector with one entry replaced.
    ///
    /// All other parameters keep their operating-point values.
    pub fn perturbed(&self, index: usize, value: f64) -> Vec<f64> {
        let mut args = self.values();
        if let Some(slot) = args.get_mut(index) {
            *slot = value;
        }
        args
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl<S: Into<String>> Extend<(S, f64)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
