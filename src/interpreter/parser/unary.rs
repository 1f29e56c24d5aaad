use tracing::trace;

use crate::{
    ast::{Node, UnaryNode, UnaryOperator},
    interpreter::{
        evaluator::simplify::simplify,
        parameters::ParameterRegistry,
        parser::core::{ParseResult, ParsingContext},
        resolution::refine::ensure_compatible_operands,
    },
};

/// Builds a typed unary node and folds it if the operand is constant.
///
/// # Errors
/// [`crate::error::ParseError::LogicallyInvalid`] if no signature of `op`
/// accepts the operand, for example `-"text"`.
pub fn build_unary(op: UnaryOperator, operand: Node, registry: &mut ParameterRegistry) -> ParseResult<Node> {
    let operands = [operand];
    let costs = ensure_compatible_operands(op.name(), op.signatures(), &operands, registry)?;
    let [operand] = operands;
    simplify(Node::Unary(UnaryNode { op,
                                     operand: Box::new(operand),
                                     costs }))
}

impl ParsingContext<'_> {
    /// Tries to read `text` as a prefix operator applied to the rest.
    ///
    /// Returns `Ok(None)` if `text` does not start with a unary operator or
    /// its operand does not resolve.
    pub(crate) fn resolve_unary(&mut self, text: &str) -> ParseResult<Option<Node>> {
        let Some(first) = text.chars().next() else {
            return Ok(None);
        };
        let Some(op) = self.markers.unary(first) else {
            return Ok(None);
        };

        let snapshot = self.parameters.clone();
        let result = self.resolve(&text[first.len_utf8()..])
                         .and_then(|operand| build_unary(op, operand, &mut self.parameters));
        match result {
            Ok(node) => Ok(Some(node)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                trace!(operator = op.name(), error = %e, "unary candidate failed");
                self.parameters = snapshot;
                Ok(None)
            },
        }
    }
}
