use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        parameters::ParameterRegistry,
        resolution::{
            cost::{combine, CostTable},
            signature::{accepted_at, Signature},
        },
    },
};

/// Returns the cost table of `node`.
///
/// Parameters read theirs from `registry`; every other node has one stored.
#[must_use]
pub fn node_costs(node: &Node, registry: &ParameterRegistry) -> CostTable {
    match node {
        Node::Parameter(parameter) => registry.get(&parameter.name)
                                              .map(|context| context.costs())
                                              .unwrap_or_default(),
        _ => node.stored_costs().copied().unwrap_or_default(),
    }
}

/// Checks that `operands` can feed at least one of `signatures` and returns
/// the resulting cost table of the operation.
///
/// Parameters used directly as operands are narrowed to the types the
/// operation accepts at their position.
///
/// # Errors
/// Returns [`ParseError::LogicallyInvalid`] if an operand cannot take any
/// accepted type or no signature applies to the operand combination.
pub fn ensure_compatible_operands(operation: &str,
                                  signatures: &[Signature],
                                  operands: &[Node],
                                  registry: &mut ParameterRegistry)
                                  -> Result<CostTable, ParseError> {
    for (position, operand) in operands.iter().enumerate() {
        let accepted = accepted_at(signatures, position);
        if let Node::Parameter(parameter) = operand
           && let Some(context) = registry.get_mut(&parameter.name)
        {
            context.determine_weakly(accepted)?;
            continue;
        }

        let possible = node_costs(operand, registry).possible_types();
        if (possible & accepted).is_empty() {
            return Err(ParseError::logical(format!("{operation} accepts {accepted} at operand {}, found {possible}",
                                                   position + 1)));
        }
    }

    let tables = operands.iter()
                         .map(|operand| node_costs(operand, registry))
                         .collect::<Vec<_>>();
    let costs = combine(signatures, &tables);
    if costs.is_empty() {
        return Err(ParseError::logical(format!("{operation} has no signature for operands of types {}",
                                               describe(&tables))));
    }
    Ok(costs)
}

/// Recomputes every cost table of the tree bottom-up against `registry`.
///
/// Used after parameters are bound to concrete types.
///
/// # Errors
/// Returns [`ParseError::LogicallyInvalid`] naming the first node that can no
/// longer produce any type.
pub fn refine(node: &mut Node, registry: &ParameterRegistry) -> Result<(), ParseError> {
    let (operation, signatures, operands, slot): (&str, &[Signature], Vec<CostTable>, &mut CostTable) =
        match node {
            Node::Constant(_) | Node::Parameter(_) => return Ok(()),
            Node::Unary(unary) => {
                refine(&mut unary.operand, registry)?;
                let operands = vec![node_costs(&unary.operand, registry)];
                (unary.op.name(), unary.op.signatures(), operands, &mut unary.costs)
            },
            Node::Binary(binary) => {
                refine(&mut binary.left, registry)?;
                refine(&mut binary.right, registry)?;
                let operands = vec![node_costs(&binary.left, registry), node_costs(&binary.right, registry)];
                (binary.op.name(), binary.op.signatures(), operands, &mut binary.costs)
            },
            Node::Call(call) => {
                for arg in &mut call.args {
                    refine(arg, registry)?;
                }
                let operands = call.args.iter().map(|arg| node_costs(arg, registry)).collect();
                (call.function.name(), call.function.signatures(), operands, &mut call.costs)
            },
        };

    let costs = combine(signatures, &operands);
    if costs.is_empty() {
        return Err(ParseError::logical(format!("{operation} has no signature for operands of types {}",
                                               describe(&operands))));
    }
    *slot = costs;
    Ok(())
}

fn describe(tables: &[CostTable]) -> String {
    tables.iter()
          .map(|table| table.possible_types().to_string())
          .collect::<Vec<_>>()
          .join(", ")
}
