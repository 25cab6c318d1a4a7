//! Custom bindings: registration, precedence over structural shape, and
//! bindings that recurse into the engine.

use shape_ir::{
    category_of, serialize, serialize_with_options, serializer, strategy, value, Category, Error,
    Serializable, SerializeOptions, Serializer, Value,
};
use std::collections::BTreeMap;

/// Iterable, but registered with its own conversion.
struct Tags(Vec<String>);

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Shaped like a pair, but registered with its own conversion.
struct Range {
    start: u32,
    end: u32,
}

struct Money {
    cents: i64,
    currency: &'static str,
}

serializer! {
    Tags => |tags| Ok(Value::from(tags.0.join(",")));
    Range => |range| Ok(Value::from(format!("{}..{}", range.start, range.end)));
    Money => |money, ser| {
        if money.currency.len() != 3 {
            return Err(Error::custom(format!("bad currency code {:?}", money.currency)));
        }
        strategy::pair(ser, money.currency, &money.cents)
    };
}

/// Implemented by hand rather than through the macro.
struct Percent(f64);

impl Serializable for Percent {
    const CATEGORY: Category = Category::Number;

    fn to_value(&self, serializer: &Serializer) -> shape_ir::Result<Value> {
        strategy::number(serializer, &(self.0 * 100.0))
    }
}

#[test]
fn test_binding_wins_over_collection_shape() {
    assert_eq!(category_of::<Tags>(), Category::UserSerializable);

    let tags = Tags(vec!["a".into(), "b".into()]);
    assert_eq!(serialize(&tags).unwrap(), Value::from("a,b"));

    // Iterating the same data without the binding gives the structural shape.
    let items: Vec<&String> = tags.into_iter().collect();
    assert_eq!(serialize(&items).unwrap(), value!(["a", "b"]));
}

#[test]
fn test_binding_wins_over_pair_shape() {
    assert_eq!(category_of::<Range>(), Category::UserSerializable);
    assert_eq!(
        serialize(&Range { start: 1, end: 4 }).unwrap(),
        Value::from("1..4")
    );
    assert_eq!(serialize(&(1u32, 4u32)).unwrap(), value!([1, 4]));
}

#[test]
fn test_bindings_nest_inside_builtin_shapes() {
    let mut ledger = BTreeMap::new();
    ledger.insert(
        "rent".to_string(),
        Money {
            cents: 120_000,
            currency: "EUR",
        },
    );
    ledger.insert(
        "coffee".to_string(),
        Money {
            cents: 350,
            currency: "NOK",
        },
    );

    assert_eq!(
        serialize(&ledger).unwrap(),
        value!([["coffee", ["NOK", 350]], ["rent", ["EUR", 120000]]])
    );
}

#[test]
fn test_binding_failure_aborts_whole_value() {
    let wallet = vec![
        Money {
            cents: 1,
            currency: "USD",
        },
        Money {
            cents: 2,
            currency: "DOLLARS",
        },
    ];
    let err = serialize(&wallet).unwrap_err();
    assert_eq!(err, Error::custom("bad currency code \"DOLLARS\""));
    assert_eq!(err.to_string(), "Error: bad currency code \"DOLLARS\"");
}

#[test]
fn test_manual_impl_routes_through_number_strategy() {
    assert_eq!(category_of::<Percent>(), Category::Number);
    assert_eq!(serialize(&Percent(0.25)).unwrap(), Value::from(25));

    let options = SerializeOptions::strict();
    assert_eq!(
        serialize_with_options(&Percent(f64::INFINITY), options).unwrap_err(),
        Error::non_finite("Infinity")
    );
}

#[test]
fn test_binding_sees_caller_options() {
    let options = SerializeOptions::new().with_max_depth(2);
    let money = Money {
        cents: 5,
        currency: "GBP",
    };
    // Money (1) -> pair elements (2).
    assert!(serialize_with_options(&money, options.clone()).is_ok());
    // Vec (1) -> Money (2) -> pair elements (3).
    assert_eq!(
        serialize_with_options(&vec![money], options).unwrap_err(),
        Error::depth_limit(2)
    );
}

#[test]
fn test_wrapped_bindings_keep_their_category() {
    assert_eq!(category_of::<Box<Tags>>(), Category::UserSerializable);
    assert_eq!(category_of::<Option<&Range>>(), Category::UserSerializable);

    let maybe: Option<Range> = None;
    assert_eq!(serialize(&maybe).unwrap(), Value::Null);
}
