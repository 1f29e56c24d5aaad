use std::collections::HashMap;

use crate::{
    error::ParseError,
    interpreter::{
        resolution::cost::CostTable,
        value::kind::{SupportableValueType, SupportedValueType},
    },
};

/// Type knowledge about one named parameter.
///
/// While the expression is parsed, each operator that consumes the parameter
/// narrows the set of types it may take. At computation time the parameter is
/// bound to the single type of the value supplied for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterContext {
    name:        String,
    order:       usize,
    supportable: SupportableValueType,
    determined:  Option<SupportedValueType>,
}

impl ParameterContext {
    fn new(name: String, order: usize) -> Self {
        Self { name,
               order,
               supportable: SupportableValueType::ALL,
               determined: None }
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the parameter's first textual occurrence.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// The types this parameter may still take.
    #[must_use]
    pub const fn possible_types(&self) -> SupportableValueType {
        self.supportable
    }

    /// The single type this parameter was bound to, if any.
    #[must_use]
    pub const fn determined_type(&self) -> Option<SupportedValueType> {
        self.determined
    }

    /// Restricts the parameter to the types in `types`.
    ///
    /// If exactly one type remains the parameter becomes determined.
    ///
    /// # Errors
    /// Fails with [`ParseError::LogicallyInvalid`] if no type remains.
    pub fn determine_weakly(&mut self, types: SupportableValueType) -> Result<(), ParseError> {
        let narrowed = self.supportable & types;
        if narrowed.is_empty() {
            return Err(ParseError::logical(format!("parameter '{}' must be {} but can only be {types}",
                                                   self.name, self.supportable)));
        }
        self.supportable = narrowed;
        self.determined = narrowed.single();
        Ok(())
    }

    /// Binds the parameter to exactly `ty`.
    ///
    /// # Errors
    /// Fails with [`ParseError::LogicallyInvalid`] if `ty` is not among the
    /// types the parameter may take.
    pub fn determine_strongly(&mut self, ty: SupportedValueType) -> Result<(), ParseError> {
        if !self.supportable.contains(ty) {
            return Err(ParseError::logical(format!("parameter '{}' cannot be {ty}, expected {}",
                                                   self.name, self.supportable)));
        }
        self.supportable = ty.mask();
        self.determined = Some(ty);
        Ok(())
    }

    /// Cost table of a reference to this parameter.
    ///
    /// An open parameter is free in every type it may take; a bound one pays
    /// the conversion from its bound type.
    #[must_use]
    pub fn costs(&self) -> CostTable {
        match self.determined {
            Some(ty) if self.supportable == ty.mask() => CostTable::converted_from(ty),
            _ => CostTable::free(self.supportable),
        }
    }
}

/// Registry of the parameters of one expression, in textual order.
///
/// # Example
/// ```
/// use mathex::interpreter::parameters::ParameterRegistry;
///
/// let mut registry = ParameterRegistry::default();
/// assert_eq!(registry.register("y"), 0);
/// assert_eq!(registry.register("x"), 1);
/// assert_eq!(registry.register("y"), 0);
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["y", "x"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterRegistry {
    parameters: Vec<ParameterContext>,
    index:      HashMap<String, usize>,
}

impl ParameterRegistry {
    /// Registers `name` if unseen and returns its order.
    pub fn register(&mut self, name: &str) -> usize {
        if let Some(order) = self.index.get(name) {
            return *order;
        }
        let order = self.parameters.len();
        self.parameters.push(ParameterContext::new(name.to_string(), order));
        self.index.insert(name.to_string(), order);
        order
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterContext> {
        self.index.get(name).map(|order| &self.parameters[*order])
    }

    /// Looks up a parameter for narrowing or binding.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParameterContext> {
        self.index.get(name).map(|order| &mut self.parameters[*order])
    }

    /// Returns `true` if `name` is a registered parameter.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Parameter names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(ParameterContext::name)
    }

    /// Iterates over all parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterContext> {
        self.parameters.iter()
    }

    /// The type mask of every parameter, in order.
    ///
    /// Two registries with equal masks resolve any text identically.
    #[must_use]
    pub fn masks(&self) -> Vec<SupportableValueType> {
        self.parameters.iter().map(ParameterContext::possible_types).collect()
    }

    /// Number of parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if the expression has no parameters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
