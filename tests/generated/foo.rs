// DO NOT EDIT THIS FILE!
//
// This file is generated from the CDP specification. If you need to make
// changes, edit the generator and regenerate all of the modules.
//
// CDP domain: Foo

//! Things and widgets.
#![allow(deprecated)]

use super::util;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: i64,
    pub y: Option<String>,
}

impl Bar {
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = util::JsonMap::new();
        json.insert("x".to_owned(), serde_json::Value::from(self.x.clone()));
        if let Some(v) = &self.y {
            json.insert("y".to_owned(), serde_json::Value::from(v.clone()));
        }
        serde_json::Value::Object(json)
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        let json = util::as_object(json)?;
        Ok(Bar {
            x: util::decode_integer(util::required(json, "x")?)?,
            y: util::optional(json, "y").map(util::decode_string).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    FirstKind,
    SecondKind,
    Third,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::FirstKind => "first-kind",
            Kind::SecondKind => "secondKind",
            Kind::Third => "third",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.as_str())
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        match util::as_str(json)? {
            "first-kind" => Ok(Kind::FirstKind),
            "secondKind" => Ok(Kind::SecondKind),
            "third" => Ok(Kind::Third),
            other => Err(util::CdpError::InvalidEnumValue {
                type_name: "Kind",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Names(pub Vec<String>);

impl Names {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.0.iter().cloned().map(serde_json::Value::from).collect())
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        util::decode_array(json, util::decode_string).map(Names)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub parent: Option<Box<Trace>>,
    pub kinds: Option<Vec<Kind>>,
}

impl Trace {
    pub fn to_json(&self) -> serde_json::Value {
        let mut json = util::JsonMap::new();
        json.insert("label".to_owned(), serde_json::Value::from(self.label.clone()));
        if let Some(v) = &self.parent {
            json.insert("parent".to_owned(), v.to_json());
        }
        if let Some(v) = &self.kinds {
            json.insert("kinds".to_owned(), serde_json::Value::Array(v.iter().map(|i| i.to_json()).collect()));
        }
        serde_json::Value::Object(json)
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        let json = util::as_object(json)?;
        Ok(Trace {
            label: util::decode_string(util::required(json, "label")?)?,
            parent: util::optional(json, "parent").map(|j: &serde_json::Value| Trace::from_json(j).map(Box::new)).transpose()?,
            kinds: util::optional(json, "kinds").map(|j: &serde_json::Value| util::decode_array(j, Kind::from_json)).transpose()?,
        })
    }
}

/// # Parameters
/// * `a`:
/// * `b`: *(Optional)*
pub fn do_thing(a: i64, b: Option<String>) -> util::Command<()> {
    let mut params = util::JsonMap::new();
    params.insert("a".to_owned(), serde_json::Value::from(a.clone()));
    if let Some(v) = &b {
        params.insert("b".to_owned(), serde_json::Value::from(v.clone()));
    }
    util::Command::new("Foo.doThing", Some(params), |_json| Ok(()))
}

/// # Returns
/// * `bar`:
pub fn get_bar() -> util::Command<Bar> {
    util::Command::new("Foo.getBar", None, |json| Ok(Bar::from_json(util::required(json, "bar")?)?))
}

/// # Parameters
/// * `type_`:
///
/// # Returns
/// * `width`:
/// * `names`: *(Optional)*
pub fn measure(type_: Kind) -> util::Command<(f64, Option<Names>)> {
    let mut params = util::JsonMap::new();
    params.insert("type".to_owned(), type_.to_json());
    util::Command::new("Foo.measure", Some(params), |json| Ok((util::decode_number(util::required(json, "width")?)?, util::optional(json, "names").map(Names::from_json).transpose()?)))
}

/// **EXPERIMENTAL**
#[deprecated(since = "1.3")]
pub fn legacy() -> util::Command<()> {
    util::Command::new("Foo.legacy", None, |_json| Ok(()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChanged {
    pub bar: Bar,
    pub kind: Option<Kind>,
}

impl util::Event for BarChanged {
    const METHOD: &'static str = "Foo.barChanged";

    fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {
        let json = util::event_params(json)?;
        Ok(BarChanged {
            bar: Bar::from_json(util::required(&json, "bar")?)?,
            kind: util::optional(&json, "kind").map(Kind::from_json).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reset {}

impl util::Event for Reset {
    const METHOD: &'static str = "Foo.reset";

    fn from_json(_json: &serde_json::Value) -> Result<Self, util::CdpError> {
        Ok(Reset {})
    }
}
