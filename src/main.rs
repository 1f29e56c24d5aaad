use std::{collections::HashMap, fs};

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use mathex::{ExpressionParsingService, MathDefinition, Tolerance, Value};

/// mathex interprets a mathematical expression and prints its result.
///
/// Parameters are supplied by name, e.g. `mathex "x * 2 + y" -p x=3 -p y=0.5`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The expression to compute.
    expression: String,

    /// A parameter value as `name=value`. The value is read as an expression
    /// literal; anything else is taken as text.
    #[arg(short, long = "parameter", value_name = "NAME=VALUE")]
    parameters: Vec<String>,

    /// Lower bound of a floating-point comparison tolerance.
    #[arg(long, requires = "tolerance_upper")]
    tolerance_lower: Option<f64>,

    /// Upper bound of a floating-point comparison tolerance.
    #[arg(long, requires = "tolerance_lower")]
    tolerance_upper: Option<f64>,

    /// Percentage comparison tolerance, as a fraction in [0, 1].
    #[arg(long, conflicts_with_all = ["tolerance_lower", "proportional"])]
    percentage: Option<f64>,

    /// Proportional comparison tolerance, as a factor >= 1.
    #[arg(long, conflicts_with = "tolerance_lower")]
    proportional: Option<f64>,

    /// A JSON file overriding the default operator symbols.
    #[arg(short, long, value_name = "FILE")]
    definition: Option<String>,

    /// Print the parsed and simplified expression instead of computing it.
    #[arg(long)]
    show: bool,
}

impl Args {
    fn tolerance(&self) -> Option<Tolerance> {
        if let (Some(lower), Some(upper)) = (self.tolerance_lower, self.tolerance_upper) {
            return Some(Tolerance::range(lower, upper));
        }
        self.percentage
            .map(Tolerance::percentage)
            .or_else(|| self.proportional.map(Tolerance::proportional))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let service = match &args.definition {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| {
                                                   format!("Failed to read the definition file '{path}'. Perhaps this file does not exist?")
                                               })?;
            let definition: MathDefinition =
                serde_json::from_str(&json).with_context(|| format!("'{path}' is not a valid math definition"))?;
            ExpressionParsingService::with_definition(definition)?
        },
        None => ExpressionParsingService::new(),
    };

    let expression = service.interpret(&args.expression);
    if !expression.recognized_correctly() {
        bail!("Expression '{}' is not recognized.", args.expression);
    }
    if args.show {
        println!("{expression}");
        return Ok(());
    }

    let mut values = HashMap::new();
    for parameter in &args.parameters {
        let (name, text) = parameter.split_once('=')
                                    .ok_or_else(|| anyhow!("Parameter '{parameter}' is not of the form name=value."))?;
        values.insert(name.trim().to_string(), parse_value(&service, text.trim()));
    }

    let result = expression.compute_with_finder(args.tolerance().as_ref(), &values)?;
    println!("{result}");
    Ok(())
}

/// Reads a parameter value the way the expression language reads literals.
fn parse_value(service: &ExpressionParsingService, text: &str) -> Value {
    let literal = service.interpret(text);
    match literal.root().and_then(|root| root.as_constant()) {
        Some(value) if literal.parameter_names().is_empty() => value.clone(),
        _ => Value::String(text.to_string()),
    }
}
