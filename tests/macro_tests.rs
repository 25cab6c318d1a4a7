use shape_ir::{
    category_of, impl_collection, serialize, serializer, value, Category, Error, Number, Scalar,
    Value,
};

#[test]
fn test_value_macro_null() {
    let value = value!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_value_macro_booleans() {
    assert_eq!(value!(true), Value::Scalar(Scalar::Bool(true)));
    assert_eq!(value!(false), Value::Scalar(Scalar::Bool(false)));
}

#[test]
fn test_value_macro_numbers() {
    let int_val = value!(42);
    assert_eq!(int_val.as_number().map(Number::as_str), Some("42"));

    let float_val = value!(3.5);
    assert_eq!(float_val.as_f64(), Some(3.5));

    let negative_val = value!(-123);
    assert_eq!(negative_val.as_i64(), Some(-123));
}

#[test]
fn test_value_macro_strings() {
    assert_eq!(
        value!("hello world"),
        Value::Scalar(Scalar::String("hello world".to_string()))
    );
    assert_eq!(value!(""), Value::from(""));
}

#[test]
fn test_value_macro_sequences() {
    assert_eq!(value!([]), Value::Sequence(vec![]));

    let mixed = value!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Sequence(vec![
            Value::from(1),
            Value::from("hello"),
            Value::from(true),
            Value::Null,
        ])
    );

    let nested = value!([[1, 2], [], [[3]]]);
    assert_eq!(nested.get(0), Some(&value!([1, 2])));
    assert_eq!(nested.get(1), Some(&Value::Sequence(vec![])));
    assert_eq!(nested.get(2).and_then(|v| v.get(0)), Some(&value!([3])));
}

#[test]
fn test_value_macro_negative_elements() {
    let offsets = value!([-1, 0, -2.5, [-7]]);
    assert_eq!(offsets.get(0).and_then(Value::as_i64), Some(-1));
    assert_eq!(offsets.get(2).and_then(Value::as_f64), Some(-2.5));
    assert_eq!(offsets.get(3), Some(&value!([(-7)])));
}

#[test]
fn test_value_macro_expressions() {
    let name = String::from("Ada");
    let ids = vec![1u8, 2];
    let value = value!([name, ids, (1 + 1)]);
    assert_eq!(value, value!(["Ada", [1, 2], 2]));
}

struct Celsius(f64);

struct Station {
    name: &'static str,
    readings: Vec<Celsius>,
}

serializer! {
    Celsius => |c| {
        if c.0 < -273.15 {
            return Err(Error::custom(format!("{} is below absolute zero", c.0)));
        }
        Ok(Value::from(format!("{}C", c.0)))
    };
    Station => |station, ser| ser.serialize(&(station.name, &station.readings));
}

#[test]
fn test_serializer_macro_single_argument_form() {
    assert_eq!(category_of::<Celsius>(), Category::UserSerializable);
    assert_eq!(serialize(&Celsius(21.5)).unwrap(), Value::from("21.5C"));
}

#[test]
fn test_serializer_macro_two_argument_form() {
    let station = Station {
        name: "Oslo",
        readings: vec![Celsius(-3.0), Celsius(1.5)],
    };
    assert_eq!(serialize(&station).unwrap(), value!(["Oslo", ["-3C", "1.5C"]]));
}

#[test]
fn test_serializer_macro_errors_surface_unchanged() {
    let station = Station {
        name: "Nowhere",
        readings: vec![Celsius(10.0), Celsius(-300.0)],
    };
    assert_eq!(
        serialize(&station).unwrap_err(),
        Error::custom("-300 is below absolute zero")
    );
}

struct Ring {
    slots: [Option<u8>; 4],
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Option<u8>;
    type IntoIter = std::slice::Iter<'a, Option<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl_collection!(Ring);

#[test]
fn test_impl_collection_macro() {
    assert_eq!(category_of::<Ring>(), Category::Collection);

    let ring = Ring {
        slots: [Some(1), None, Some(3), None],
    };
    assert_eq!(serialize(&ring).unwrap(), value!([1, null, 3, null]));
}
