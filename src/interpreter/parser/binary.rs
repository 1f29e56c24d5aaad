use tracing::trace;

use crate::{
    ast::{BinaryNode, BinaryOperator, Node},
    interpreter::{
        evaluator::simplify::simplify,
        parameters::ParameterRegistry,
        parser::core::{ParseResult, ParsingContext},
        resolution::refine::ensure_compatible_operands,
    },
};

/// Builds a typed binary node and folds it if both operands are constant.
///
/// # Errors
/// [`crate::error::ParseError::LogicallyInvalid`] if no signature of `op`
/// accepts the operands.
pub fn build_binary(op: BinaryOperator, left: Node, right: Node, registry: &mut ParameterRegistry) -> ParseResult<Node> {
    let operands = [left, right];
    let costs = ensure_compatible_operands(op.name(), op.signatures(), &operands, registry)?;
    let [left, right] = operands;
    simplify(Node::Binary(BinaryNode { op,
                                       left: Box::new(left),
                                       right: Box::new(right),
                                       costs }))
}

impl ParsingContext<'_> {
    /// Tries to split `text` at a binary operator.
    ///
    /// Levels are tried loosest first; within a level, occurrences are tried
    /// from the right, which makes every level left-associative. The first
    /// occurrence whose operands both resolve wins. A failed occurrence
    /// restores the parameter registry before the next one is tried.
    ///
    /// Returns `Ok(None)` if no occurrence succeeds.
    pub(crate) fn resolve_binary(&mut self, text: &str) -> ParseResult<Option<Node>> {
        for level in BinaryOperator::LEVELS {
            let occurrences = text.char_indices()
                                  .filter_map(|(at, c)| {
                                      self.markers
                                          .binary(c)
                                          .filter(|op| level.contains(op))
                                          .map(|op| (at, c.len_utf8(), op))
                                  })
                                  .collect::<Vec<_>>();

            for (at, width, op) in occurrences.into_iter().rev() {
                let left = text[..at].trim();
                let right = text[at + width..].trim();
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                if left.chars().next_back().is_some_and(|c| self.markers.is_marker(c)) {
                    continue;
                }

                let snapshot = self.parameters.clone();
                match self.try_binary(op, left, right) {
                    Ok(node) => return Ok(Some(node)),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        trace!(operator = op.name(), error = %e, "binary candidate failed");
                        self.parameters = snapshot;
                    },
                }
            }
        }
        Ok(None)
    }

    fn try_binary(&mut self, op: BinaryOperator, left: &str, right: &str) -> ParseResult<Node> {
        let left = self.resolve(left)?;
        let right = self.resolve(right)?;
        build_binary(op, left, right, &mut self.parameters)
    }
}
