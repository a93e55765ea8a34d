//! Filter, update and sort documents used by the walkthrough.
//!
//! Three ways of spelling the same name lookup are kept side by side: a
//! literal document, an operator builder and a field-checked builder.

use bson::{doc, Bson, Document};

/// Fields of [`crate::Person`] as stored in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Id,
    Name,
    Age,
    Sex,
}

impl PersonField {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonField::Id => "_id",
            PersonField::Name => "name",
            PersonField::Age => "age",
            PersonField::Sex => "sex",
        }
    }
}

pub fn literal_name(name: &str) -> Document {
    doc! { "name": name }
}

pub fn literal_field(field: PersonField, value: impl Into<Bson>) -> Document {
    let mut filter = Document::new();
    filter.insert(field.as_str(), value.into());
    filter
}

pub fn eq(field: &str, value: impl Into<Bson>) -> Document {
    let mut filter = Document::new();
    filter.insert(field, doc! { "$eq": value.into() });
    filter
}

pub fn field_eq(field: PersonField, value: impl Into<Bson>) -> Document {
    eq(field.as_str(), value)
}

/// `$and` of the given clauses. A single clause is returned as is.
pub fn and(clauses: impl IntoIterator<Item = Document>) -> Document {
    let mut clauses: Vec<Document> = clauses.into_iter().collect();
    if clauses.len() == 1 {
        return clauses.remove(0);
    }
    doc! { "$and": clauses }
}

/// Exclusive age range.
pub fn age_between(above: i32, below: i32) -> Document {
    let mut filter = Document::new();
    filter.insert(PersonField::Age.as_str(), doc! { "$gt": above, "$lt": below });
    filter
}

pub fn set<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Document
where
    K: Into<String>,
    V: Into<Bson>,
{
    let mut values = Document::new();
    for (k, v) in fields {
        values.insert(k, v);
    }
    doc! { "$set": values }
}

pub fn descending(field: PersonField) -> Document {
    let mut sort = Document::new();
    sort.insert(field.as_str(), -1);
    sort
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_filter_styles() {
        assert_eq!(literal_name("张三"), doc! { "name": "张三" });
        assert_eq!(eq("name", "张三"), doc! { "name": { "$eq": "张三" } });
        assert_eq!(field_eq(PersonField::Name, "张三"), eq("name", "张三"));
        assert_eq!(literal_field(PersonField::Name, "张三"), literal_name("张三"));
    }

    #[test]
    fn id_filter_keys_on_underscore_id() {
        let id = bson::oid::ObjectId::new();
        assert_eq!(literal_field(PersonField::Id, id), doc! { "_id": id });
    }

    #[test]
    fn and_flattens_single_clause() {
        let only = literal_name("a");
        assert_eq!(and([only.clone()]), only);

        let both = and([literal_name("a"), field_eq(PersonField::Sex, true)]);
        assert_eq!(
            both,
            doc! { "$and": [ { "name": "a" }, { "sex": { "$eq": true } } ] }
        );
    }

    #[test]
    fn range_and_update_shapes() {
        assert_eq!(age_between(90, 100), doc! { "age": { "$gt": 90, "$lt": 100 } });
        assert_eq!(
            set([("age", Bson::Int32(112)), ("sex", Bson::Boolean(false))]),
            doc! { "$set": { "age": 112, "sex": false } }
        );
        assert_eq!(descending(PersonField::Age), doc! { "age": -1 });
    }
}
