use mathex::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::{
        parameters::ParameterRegistry,
        resolution::{
            cost::{combine, CostTable},
            signature::{
                accepted_at, ADD, BITWISE, DIVIDE, EQUALITY, INTEGER_OR_NUMERIC, NEGATE, NOT, ORDERING, POWER, SHIFT,
            },
        },
        value::kind::{SupportableValueType, SupportedValueType as T},
    },
};

#[test]
fn weak_narrowing_intersects() {
    let mut registry = ParameterRegistry::default();
    registry.register("x");
    let x = registry.get_mut("x").unwrap();

    x.determine_weakly(SupportableValueType::INTEGER | SupportableValueType::NUMERIC)
     .unwrap();
    assert_eq!(x.determined_type(), None);

    x.determine_weakly(SupportableValueType::NUMERIC | SupportableValueType::STRING)
     .unwrap();
    assert_eq!(x.determined_type(), Some(T::Numeric));

    assert!(x.determine_weakly(SupportableValueType::BOOLEAN).is_err());
}

#[test]
fn strong_binding_respects_narrowing() {
    let mut registry = ParameterRegistry::default();
    registry.register("s");
    let s = registry.get_mut("s").unwrap();
    s.determine_weakly(SupportableValueType::STRING | SupportableValueType::INTEGER)
     .unwrap();

    assert!(s.determine_strongly(T::Boolean).is_err());
    s.determine_strongly(T::Integer).unwrap();
    assert_eq!(s.costs().total(T::Numeric), Some(1));
}

#[test]
fn open_parameters_are_free() {
    let mut registry = ParameterRegistry::default();
    registry.register("p");
    let costs = registry.get("p").unwrap().costs();
    for ty in T::ALL {
        assert_eq!(costs.total(ty), Some(0));
    }
}

#[test]
fn strings_concatenate_only_through_the_string_signature() {
    let text = CostTable::converted_from(T::String);
    let number = CostTable::converted_from(T::Integer);
    let table = combine(BinaryOperator::Add.signatures(), &[text, number]);

    assert_eq!(table.possible_types(), SupportableValueType::STRING);
    assert_eq!(table.total(T::String), Some(15));
    assert_eq!(table.get(T::String).map(|cost| cost.signature), Some(3));
}

#[test]
fn booleans_cannot_be_negated_arithmetically() {
    let flag = CostTable::converted_from(T::Boolean);
    let table = combine(UnaryOperator::Negate.signatures(), &[flag]);
    assert!(table.is_empty());
}

#[test]
fn ties_prefer_the_earlier_signature() {
    let open = CostTable::free(SupportableValueType::ALL);
    let table = combine(BinaryOperator::Add.signatures(), &[open, open]);

    assert_eq!(table.cheapest().map(|(ty, _)| ty), Some(T::Integer));
    assert_eq!(table.get(T::Numeric).map(|cost| cost.signature), Some(1));
}

#[test]
fn comparisons_convert_numbers_before_comparing() {
    let integer = CostTable::converted_from(T::Integer);
    let numeric = CostTable::converted_from(T::Numeric);
    let table = combine(BinaryOperator::LessThan.signatures(), &[integer, numeric]);

    assert_eq!(table.get(T::Boolean).map(|cost| cost.signature), Some(1));
    assert_eq!(table.total(T::Boolean), Some(2));
}

#[test]
fn every_operator_table_has_uniform_arity() {
    for (table, arity) in [(ADD, 2),
                           (INTEGER_OR_NUMERIC, 2),
                           (DIVIDE, 2),
                           (POWER, 2),
                           (SHIFT, 2),
                           (BITWISE, 2),
                           (EQUALITY, 2),
                           (ORDERING, 2),
                           (NEGATE, 1),
                           (NOT, 1)]
    {
        assert!(table.iter().all(|signature| signature.arity() == arity));
    }
}

#[test]
fn booleans_are_not_ordered() {
    assert!(!accepted_at(ORDERING, 0).contains(T::Boolean));
    assert!(accepted_at(EQUALITY, 1).contains(T::Boolean));
}
