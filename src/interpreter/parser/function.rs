use crate::{
    ast::{CallNode, Node},
    error::ParseError,
    interpreter::{
        evaluator::{function::core::FunctionDefinition, simplify::simplify},
        parameters::ParameterRegistry,
        parser::core::{ParseResult, ParsingContext},
        resolution::refine::ensure_compatible_operands,
    },
};
use std::sync::Arc;

/// Builds a typed call node and folds it if every argument is constant and
/// the function is deterministic.
///
/// # Errors
/// [`ParseError::LogicallyInvalid`] if no signature accepts the arguments.
pub fn build_call(function: Arc<FunctionDefinition>, args: Vec<Node>, registry: &mut ParameterRegistry) -> ParseResult<Node> {
    let costs = ensure_compatible_operands(function.name(), function.signatures(), &args, registry)?;
    simplify(Node::Call(CallNode { function,
                                   args,
                                   costs }))
}

impl ParsingContext<'_> {
    /// Resolves a `name(arg, ...)` symbol text.
    ///
    /// Nested groups and calls inside the arguments are already placeholders,
    /// so splitting on the parameter separator yields the arguments. The
    /// function is chosen by name and argument count.
    pub(crate) fn resolve_call(&mut self, expression: &str) -> ParseResult<Node> {
        let definition = self.settings.definition;
        let not_recognized = || ParseError::not_recognized(expression);

        let open_at = expression.find(definition.open_parenthesis.as_str()).ok_or_else(not_recognized)?;
        let name = expression[..open_at].trim();
        let inner = expression[open_at + definition.open_parenthesis.len()..].strip_suffix(definition.close_parenthesis.as_str())
                                                                             .ok_or_else(not_recognized)?;

        let mut args = Vec::new();
        if !inner.trim().is_empty() {
            for arg in inner.split(definition.parameter_separator.as_str()) {
                args.push(self.resolve(arg)?);
            }
        }

        self.check_cancelled()?;
        let function = self.settings
                           .functions
                           .lookup(name, args.len())
                           .ok_or_else(|| ParseError::UnknownFunction { name:  name.to_string(),
                                                                        arity: args.len(), })?;
        build_call(function, args, &mut self.parameters)
    }
}
