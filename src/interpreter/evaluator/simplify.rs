use tracing::trace;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{generate, Frame},
        parameters::ParameterRegistry,
        parser::core::ParseResult,
    },
};

/// Folds `node` into a constant when all of its operands are constant.
///
/// The node is evaluated once through the regular code generator at its
/// cheapest type. Nodes that must be re-evaluated on every computation, such
/// as calls of `random`, are never folded. If evaluating fails, for example
/// `5 % 0`, the node is kept so that the error surfaces when the expression
/// is computed.
///
/// # Errors
/// [`crate::error::ParseError::Engine`] if the generator rejects the node,
/// which means its cost table and its operands disagree.
///
/// # Example
/// ```
/// use mathex::ExpressionParsingService;
///
/// let service = ExpressionParsingService::new();
/// let expression = service.interpret("2 * (3 + 4)");
/// assert!(expression.is_constant());
/// assert_eq!(expression.to_string(), "14");
/// ```
pub fn simplify(node: Node) -> ParseResult<Node> {
    if node.is_constant()
       || node.requires_preserved_expression()
       || !node.children().iter().all(|child| child.is_constant())
    {
        return Ok(node);
    }
    let Some((ty, _)) = node.stored_costs().and_then(|costs| costs.cheapest()) else {
        return Ok(node);
    };

    let compiled = generate(&node, ty, &ParameterRegistry::default())?;
    match compiled(&Frame::empty()) {
        Ok(value) => {
            trace!(%node, %value, "folded constant subtree");
            Ok(Node::constant(value))
        },
        Err(error) => {
            trace!(%node, %error, "left subtree unfolded");
            Ok(node)
        },
    }
}
