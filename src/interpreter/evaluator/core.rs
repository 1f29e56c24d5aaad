use std::{fmt, sync::Arc};

use crate::{
    ast::Node,
    error::{EngineError, RuntimeError},
    interpreter::{
        evaluator::{binary::core::apply_binary, unary::apply_unary},
        parameters::ParameterRegistry,
        resolution::{cost::CostTable, signature::Signature},
        value::{core::Value, kind::SupportedValueType, tolerance::Tolerance},
    },
};

/// Type alias for evaluation results.
///
/// All evaluation functions return this type. On success, it contains the
/// resulting value; on failure, a `RuntimeError`.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The inputs of one computation.
///
/// `values` is indexed by parameter order. Slots of parameters the
/// expression does not reference may be empty.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Parameter values, already converted to their bound types.
    pub values:    Vec<Option<Value>>,
    /// Tolerance applied to comparisons.
    pub tolerance: Option<Tolerance>,
}

impl Frame {
    /// A frame without parameters or tolerance.
    #[must_use]
    pub const fn empty() -> Self {
        Self { values:    Vec::new(),
               tolerance: None, }
    }
}

/// A compiled subtree: a closure producing the node's value in one type.
pub type Compiled = Box<dyn Fn(&Frame) -> EvalResult<Value> + Send + Sync>;

/// A compiled expression root.
pub struct Evaluator {
    compiled: Compiled,
    output:   SupportedValueType,
}

impl Evaluator {
    /// Compiles `root` so that it produces a value of type `output`.
    ///
    /// Every parameter referenced by `root` must be bound in `registry`, and
    /// every cost table must be current.
    pub fn build(root: &Node, output: SupportedValueType, registry: &ParameterRegistry) -> Result<Self, EngineError> {
        Ok(Self { compiled: generate(root, output, registry)?,
                  output })
    }

    /// Runs the compiled expression.
    pub fn evaluate(&self, frame: &Frame) -> EvalResult<Value> {
        (self.compiled)(frame)
    }

    /// The type of every value this evaluator produces.
    #[must_use]
    pub const fn output_type(&self) -> SupportedValueType {
        self.output
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").field("output", &self.output).finish_non_exhaustive()
    }
}

/// Generates the closure computing `node` as a value of type `requested`.
///
/// Each operator node uses the signature its cost table selected for
/// `requested`; operands are compiled at that signature's input types, and
/// the result is converted only when the signature's output differs.
///
/// # Errors
/// Returns an [`EngineError`] if the tree is inconsistent: a missing cost
/// entry, a missing constant view, or an unbound parameter.
pub fn generate(node: &Node, requested: SupportedValueType, registry: &ParameterRegistry) -> Result<Compiled, EngineError> {
    match node {
        Node::Constant(constant) => {
            let value = constant.view(requested)
                                .cloned()
                                .ok_or_else(|| EngineError::MissingView { constant: constant.value.to_string(),
                                                                          requested })?;
            Ok(Box::new(move |_: &Frame| Ok(value.clone())))
        },
        Node::Parameter(parameter) => {
            let bound = registry.get(&parameter.name).and_then(|context| context.determined_type());
            if bound.is_none() {
                return Err(EngineError::UnboundParameter { name: parameter.name.clone() });
            }
            let slot = parameter.order;
            let name = parameter.name.clone();
            Ok(Box::new(move |frame: &Frame| {
                let value = frame.values
                                 .get(slot)
                                 .and_then(Option::as_ref)
                                 .ok_or_else(|| RuntimeError::MissingParameter { name: name.clone() })?;
                value.convert_to(requested)
            }))
        },
        Node::Unary(unary) => {
            let signature = select(node, unary.op.name(), unary.op.signatures(), &unary.costs, requested)?;
            let operand = generate(&unary.operand, signature.inputs[0], registry)?;
            let op = unary.op;
            Ok(finish(signature.output, requested, move |frame: &Frame| apply_unary(op, operand(frame)?)))
        },
        Node::Binary(binary) => {
            let signature = select(node, binary.op.name(), binary.op.signatures(), &binary.costs, requested)?;
            let left = generate(&binary.left, signature.inputs[0], registry)?;
            let right = generate(&binary.right, signature.inputs[1], registry)?;
            let op = binary.op;
            let tolerant = node.is_tolerant();
            Ok(finish(signature.output, requested, move |frame: &Frame| {
                apply_binary(op, left(frame)?, right(frame)?, frame.tolerance.as_ref().filter(|_| tolerant))
            }))
        },
        Node::Call(call) => {
            let function = &call.function;
            let signature = select(node, function.name(), function.signatures(), &call.costs, requested)?;
            let args = call.args
                           .iter()
                           .zip(signature.inputs)
                           .map(|(arg, ty)| generate(arg, *ty, registry))
                           .collect::<Result<Vec<_>, _>>()?;
            let implementation = Arc::clone(function.implementation());
            Ok(finish(signature.output, requested, move |frame: &Frame| {
                let values = args.iter().map(|arg| arg(frame)).collect::<EvalResult<Vec<_>>>()?;
                implementation(&values)
            }))
        },
    }
}

/// Picks the signature the cost table recorded for `requested`.
fn select(node: &Node,
          operation: &str,
          signatures: &'static [Signature],
          costs: &CostTable,
          requested: SupportedValueType)
          -> Result<Signature, EngineError> {
    let cost = costs.get(requested)
                    .ok_or_else(|| EngineError::MissingCost { node: node.to_string(),
                                                              requested })?;
    signatures.get(cost.signature)
              .copied()
              .ok_or_else(|| EngineError::UnknownSignature { operation: operation.to_string(),
                                                             index:     cost.signature, })
}

/// Wraps `compute` with a conversion when its natural type differs from the
/// requested one.
fn finish<F>(natural: SupportedValueType, requested: SupportedValueType, compute: F) -> Compiled
    where F: Fn(&Frame) -> EvalResult<Value> + Send + Sync + 'static {
    if natural == requested {
        Box::new(compute)
    } else {
        Box::new(move |frame: &Frame| compute(frame)?.convert_to(requested))
    }
}
