use std::{collections::BTreeSet, fmt, sync::Arc};

use crate::interpreter::{
    definition::MathDefinition,
    evaluator::function::core::FunctionDefinition,
    resolution::{cost::CostTable, signature::Signature},
    value::{core::Value, kind::SupportedValueType},
};

/// Binary operators, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `|`: logical or on booleans, bitwise or otherwise.
    Or,
    /// `#`: logical exclusive or on booleans, bitwise otherwise.
    Xor,
    /// `&`: logical and on booleans, bitwise and otherwise.
    And,
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `+`: addition, string concatenation, byte stitching.
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`: always floating-point division.
    Divide,
    /// `%`
    Modulo,
    /// `^`
    Power,
}

impl BinaryOperator {
    /// Every binary operator grouped by precedence, loosest-binding first.
    pub const LEVELS: [&'static [Self]; 8] = [&[Self::Or],
                                              &[Self::Xor],
                                              &[Self::And],
                                              &[Self::Equals,
                                                Self::NotEquals,
                                                Self::LessThan,
                                                Self::LessThanOrEqual,
                                                Self::GreaterThan,
                                                Self::GreaterThanOrEqual],
                                              &[Self::LeftShift, Self::RightShift],
                                              &[Self::Add, Self::Subtract],
                                              &[Self::Multiply, Self::Divide, Self::Modulo],
                                              &[Self::Power]];

    /// Index of this operator's level in [`BinaryOperator::LEVELS`].
    #[must_use]
    pub const fn precedence(self) -> usize {
        match self {
            Self::Or => 0,
            Self::Xor => 1,
            Self::And => 2,
            Self::Equals
            | Self::NotEquals
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual => 3,
            Self::LeftShift | Self::RightShift => 4,
            Self::Add | Self::Subtract => 5,
            Self::Multiply | Self::Divide | Self::Modulo => 6,
            Self::Power => 7,
        }
    }

    /// Human readable operation name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::Xor => "xor",
            Self::And => "and",
            Self::Equals => "equals",
            Self::NotEquals => "not equals",
            Self::LessThan => "less than",
            Self::LessThanOrEqual => "less than or equal",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqual => "greater than or equal",
            Self::LeftShift => "left shift",
            Self::RightShift => "right shift",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Power => "power",
        }
    }

    /// Returns `true` for the relational operators, the only ones a
    /// [`crate::interpreter::value::tolerance::Tolerance`] applies to.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        self.precedence() == 3
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`: logical not on booleans, bitwise complement otherwise.
    Not,
}

impl UnaryOperator {
    /// Every unary operator.
    pub const ALL: [Self; 2] = [Self::Negate, Self::Not];

    /// Human readable operation name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::Not => "not",
        }
    }
}

/// A literal value together with every representation it converts into.
///
/// The views are computed once so that type unification and code generation
/// never convert the same constant twice.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantNode {
    /// The value as written (or as folded).
    pub value: Value,
    views:     [Option<Value>; 5],
    costs:     CostTable,
}

impl ConstantNode {
    /// Creates a constant and precomputes its alternate representations.
    ///
    /// Representations that would lose information are left out, so a
    /// fractional number has no integer view.
    ///
    /// # Example
    /// ```
    /// use mathex::{ast::ConstantNode, interpreter::value::{core::Value, kind::SupportedValueType}};
    ///
    /// let whole = ConstantNode::new(Value::Numeric(3.0));
    /// assert_eq!(whole.view(SupportedValueType::Integer), Some(&Value::Integer(3)));
    ///
    /// let fractional = ConstantNode::new(Value::Numeric(2.5));
    /// assert_eq!(fractional.view(SupportedValueType::Integer), None);
    /// ```
    #[must_use]
    pub fn new(value: Value) -> Self {
        let from = value.value_type();
        let mut views: [Option<Value>; 5] = Default::default();
        let mut costs = CostTable::default();

        for to in SupportedValueType::ALL {
            let Some(cost) = from.conversion_cost(to) else {
                continue;
            };
            if let Ok(view) = value.convert_to(to) {
                views[to.index()] = Some(view);
                costs.offer(to, cost, 0);
            }
        }

        Self { value,
               views,
               costs }
    }

    /// Returns the precomputed representation for `ty`.
    #[must_use]
    pub fn view(&self, ty: SupportedValueType) -> Option<&Value> {
        self.views[ty.index()].as_ref()
    }

    /// The cost of each available representation.
    #[must_use]
    pub const fn costs(&self) -> &CostTable {
        &self.costs
    }
}

/// A reference to an external, named input.
///
/// Type constraints are kept in the parameter registry so every occurrence of
/// the same name shares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNode {
    /// The parameter name as written.
    pub name:  String,
    /// Position of the first textual occurrence; the slot of its value.
    pub order: usize,
}

/// A unary operator applied to one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryNode {
    /// The operator.
    pub op:      UnaryOperator,
    /// The operand.
    pub operand: Box<Node>,
    /// Cheapest way to produce each output type.
    pub costs:   CostTable,
}

/// A binary operator applied to two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    /// The operator.
    pub op:    BinaryOperator,
    /// Left operand.
    pub left:  Box<Node>,
    /// Right operand.
    pub right: Box<Node>,
    /// Cheapest way to produce each output type.
    pub costs: CostTable,
}

/// A call of a built-in or registered function.
#[derive(Debug, Clone)]
pub struct CallNode {
    /// The function being called.
    pub function: Arc<FunctionDefinition>,
    /// Arguments, in call order.
    pub args:     Vec<Node>,
    /// Cheapest way to produce each output type.
    pub costs:    CostTable,
}

impl PartialEq for CallNode {
    fn eq(&self, other: &Self) -> bool {
        self.function.name() == other.function.name()
        && self.args == other.args
        && self.costs == other.costs
    }
}

/// An abstract syntax tree node.
///
/// The tree is built bottom-up by the parser. Operator and call nodes whose
/// operands are all constant are replaced by a folded [`Node::Constant`]
/// right after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value.
    Constant(ConstantNode),
    /// An external parameter.
    Parameter(ParameterNode),
    /// A unary operation.
    Unary(UnaryNode),
    /// A binary operation.
    Binary(BinaryNode),
    /// A function call.
    Call(CallNode),
}

impl Node {
    /// Creates a constant node.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(ConstantNode::new(value.into()))
    }

    /// Returns `true` for [`Node::Constant`].
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Returns the literal value of a constant node.
    #[must_use]
    pub const fn as_constant(&self) -> Option<&Value> {
        match self {
            Self::Constant(constant) => Some(&constant.value),
            _ => None,
        }
    }

    /// Returns `true` for comparisons, which honour a tolerance.
    #[must_use]
    pub const fn is_tolerant(&self) -> bool {
        matches!(self, Self::Binary(binary) if binary.op.is_comparison())
    }

    /// Returns `true` if this subtree must be evaluated on every computation,
    /// such as a call of `random`, and therefore can never be folded.
    #[must_use]
    pub fn requires_preserved_expression(&self) -> bool {
        match self {
            Self::Call(call) => {
                !call.function.is_deterministic()
                || call.args.iter().any(Self::requires_preserved_expression)
            },
            _ => self.children().into_iter().any(Self::requires_preserved_expression),
        }
    }

    /// The direct operands of this node.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Constant(_) | Self::Parameter(_) => Vec::new(),
            Self::Unary(unary) => vec![&unary.operand],
            Self::Binary(binary) => vec![&binary.left, &binary.right],
            Self::Call(call) => call.args.iter().collect(),
        }
    }

    /// The cost table stored on the node, if it has one.
    ///
    /// Parameters have none: their costs depend on the parameter registry.
    #[must_use]
    pub const fn stored_costs(&self) -> Option<&CostTable> {
        match self {
            Self::Constant(constant) => Some(constant.costs()),
            Self::Parameter(_) => None,
            Self::Unary(unary) => Some(&unary.costs),
            Self::Binary(binary) => Some(&binary.costs),
            Self::Call(call) => Some(&call.costs),
        }
    }

    /// Collects the names of all parameters referenced in this subtree.
    pub fn collect_parameters(&self, names: &mut BTreeSet<String>) {
        if let Self::Parameter(parameter) = self {
            names.insert(parameter.name.clone());
        }
        for child in self.children() {
            child.collect_parameters(names);
        }
    }

    /// Renders the node back into expression text using `definition`.
    ///
    /// # Example
    /// ```
    /// use mathex::ExpressionParsingService;
    ///
    /// let service = ExpressionParsingService::new();
    /// let expression = service.interpret("(x+1)*y");
    /// assert_eq!(expression.to_string(), "(x + 1) * y");
    /// ```
    #[must_use]
    pub fn render(&self, definition: &MathDefinition) -> String {
        match self {
            Self::Constant(constant) => render_constant(&constant.value, definition),
            Self::Parameter(parameter) => parameter.name.clone(),
            Self::Unary(unary) => {
                let operand = unary.operand.render(definition);
                let symbol = definition.unary_symbol(unary.op);
                if matches!(*unary.operand, Self::Binary(_)) {
                    format!("{symbol}{}{operand}{}",
                            definition.open_parenthesis, definition.close_parenthesis)
                } else {
                    format!("{symbol}{operand}")
                }
            },
            Self::Binary(binary) => {
                let level = binary.op.precedence();
                let left = binary.left.render_operand(definition, |inner| inner < level);
                let right = binary.right.render_operand(definition, |inner| inner <= level);
                format!("{left} {} {right}", definition.binary_symbol(binary.op))
            },
            Self::Call(call) => {
                let separator = format!("{} ", definition.parameter_separator);
                let args = call.args
                               .iter()
                               .map(|arg| arg.render(definition))
                               .collect::<Vec<_>>()
                               .join(&separator);
                format!("{}{}{args}{}",
                        call.function.name(),
                        definition.open_parenthesis,
                        definition.close_parenthesis)
            },
        }
    }

    fn render_operand(&self, definition: &MathDefinition, needs_group: impl Fn(usize) -> bool) -> String {
        let text = self.render(definition);
        match self {
            Self::Binary(inner) if needs_group(inner.op.precedence()) => {
                format!("{}{text}{}", definition.open_parenthesis, definition.close_parenthesis)
            },
            _ => text,
        }
    }
}

fn render_constant(value: &Value, definition: &MathDefinition) -> String {
    match value {
        Value::String(text) => {
            let delimiter = definition.string_delimiter;
            let escape = definition.escape_character;
            let mut quoted = String::with_capacity(text.len() + 2);
            quoted.push(delimiter);
            for c in text.chars() {
                if c == delimiter || c == escape {
                    quoted.push(escape);
                }
                quoted.push(c);
            }
            quoted.push(delimiter);
            quoted
        },
        Value::Numeric(r) if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e15 => format!("{r:.1}"),
        other => other.to_string(),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&MathDefinition::default()))
    }
}

/// Signatures of a unary operator.
impl UnaryOperator {
    /// The operand/result type combinations this operator supports, in
    /// preference order.
    #[must_use]
    pub const fn signatures(self) -> &'static [Signature] {
        use crate::interpreter::resolution::signature::{NEGATE, NOT};
        match self {
            Self::Negate => NEGATE,
            Self::Not => NOT,
        }
    }
}

impl BinaryOperator {
    /// The operand/result type combinations this operator supports, in
    /// preference order.
    #[must_use]
    pub const fn signatures(self) -> &'static [Signature] {
        use crate::interpreter::resolution::signature::{
            ADD, BITWISE, DIVIDE, EQUALITY, INTEGER_OR_NUMERIC, ORDERING, POWER, SHIFT,
        };
        match self {
            Self::Add => ADD,
            Self::Subtract | Self::Multiply | Self::Modulo => INTEGER_OR_NUMERIC,
            Self::Divide => DIVIDE,
            Self::Power => POWER,
            Self::LeftShift | Self::RightShift => SHIFT,
            Self::And | Self::Or | Self::Xor => BITWISE,
            Self::Equals | Self::NotEquals => EQUALITY,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual => {
                ORDERING
            },
        }
    }
}
