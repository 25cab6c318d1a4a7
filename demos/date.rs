//! Registering a custom date type and handing the result to JSON.
//!
//! Run with: cargo run --example date
//! Set `RUST_LOG=shape_ir=trace` to watch each dispatch.

use serde::Serialize;
use shape_ir::{from_serde, serialize, serializer, Error, Value};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

struct MyDate {
    year: i32,
    month: u32,
    day: u32,
}

serializer! {
    MyDate => |date| {
        if !(1..=12).contains(&date.month) {
            return Err(Error::custom(format!("invalid month {}", date.month)));
        }
        Ok(Value::from(format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)))
    };
}

#[derive(Serialize)]
struct Release {
    name: &'static str,
    version: (u32, u32, u32),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shape_ir=info")),
        )
        .with_target(false)
        .init();

    let today = MyDate {
        year: 2021,
        month: 10,
        day: 29,
    };
    let value = serialize(&today)?;
    println!("date:     {}", serde_json::to_string(&value)?);

    let mut calendar = BTreeMap::new();
    calendar.insert("release", today);
    calendar.insert(
        "freeze",
        MyDate {
            year: 2021,
            month: 10,
            day: 15,
        },
    );
    let value = serialize(&calendar)?;
    println!("calendar: {}", serde_json::to_string(&value)?);

    let value = serialize(&vec![42, 24, 54])?;
    println!("numbers:  {}", serde_json::to_string(&value)?);

    let release = Release {
        name: "shape_ir",
        version: (0, 1, 0),
    };
    let value = from_serde(&release)?;
    println!("serde:    {}", serde_json::to_string_pretty(&value)?);

    let broken = MyDate {
        year: 2021,
        month: 13,
        day: 1,
    };
    match serialize(&vec![broken]) {
        Ok(value) => println!("unexpected: {:?}", value),
        Err(err) => println!("rejected: {}", err),
    }

    Ok(())
}
