//! Walkthrough of the driver's CRUD surface over generated sample people.

pub mod config;
pub mod filters;

use bson::{doc, Bson, Document};
use futures_util::stream::TryStreamExt;
use log::{info, warn};
use mongodb::options::{ClientOptions, Credential, ReturnDocument};
use mongodb::{Client, Collection};
use rand::Rng;
use serde::Serialize;

use crate::core::errors::Result;
use crate::hanzi::HanziGenerator;
use crate::person::Person;

pub use config::{Command, DemoConfig};
use filters::PersonField;

const APP_NAME: &str = "mgsample-demo";

/// What each step of [`run`] observed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DemoReport {
    pub inserted: Option<Person>,
    pub first: Option<Person>,
    pub first_raw_keys: Vec<String>,
    pub secondary_preferred_count: u64,
    pub matches_literal: usize,
    pub matches_eq: usize,
    pub matches_field: usize,
    pub saved_age: Option<f64>,
    pub updated_matched: u64,
    pub updated_modified: u64,
    pub find_and_modify: Option<Person>,
    pub range_first: Option<Person>,
    pub range_last: Option<Person>,
}

pub async fn connect(config: &DemoConfig) -> Result<Client> {
    let mut options = ClientOptions::parse(config.uri.as_str()).await?;
    options.app_name = Some(APP_NAME.to_string());
    if let Some(username) = &config.username {
        let mut credential = Credential::default();
        credential.username = Some(username.clone());
        credential.password = config.password.clone();
        credential.source = config.auth_source.clone();
        options.credential = Some(credential);
    }
    let client = Client::with_options(options)?;
    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await?;
    info!("connected to {} (database {})", config.uri, config.database);
    Ok(client)
}

pub async fn run(client: &Client, config: &DemoConfig) -> Result<DemoReport> {
    let mut generator = HanziGenerator::new()?;
    let people: Collection<Person> = client
        .database(&config.database)
        .collection(&config.collection);
    let mut report = DemoReport::default();

    // Insert.
    let mut person = Person::random(&mut generator, config.name_length)?;
    let inserted = people.insert_one(&person).await?;
    person.id = inserted.inserted_id.as_object_id();
    info!("inserted {} (age {}) as {}", person.name, person.age, inserted.inserted_id);
    let name = person.name.clone();
    report.inserted = Some(person);

    // First document, typed and raw.
    report.first = people.find_one(doc! {}).await?;
    let raw: Collection<Document> = people.clone_with_type();
    report.first_raw_keys = raw
        .find_one(doc! {})
        .await?
        .map(|d| d.keys().cloned().collect())
        .unwrap_or_default();

    // Same collection through overridden database and collection settings.
    let preferring_secondaries: Collection<Person> = client
        .database_with_options(&config.database, config::database_options())
        .collection_with_options(&config.collection, config::collection_options());
    report.secondary_preferred_count = preferring_secondaries.count_documents(doc! {}).await?;
    info!(
        "{} documents visible with secondary-preferred reads",
        report.secondary_preferred_count
    );

    // One lookup, three filter spellings.
    report.matches_literal = count(&people, filters::literal_name(&name)).await?;
    report.matches_eq = count(&people, filters::eq("name", name.as_str())).await?;
    report.matches_field = count(&people, filters::field_eq(PersonField::Name, name.as_str())).await?;
    info!(
        "name lookups matched literal={} eq={} field={}",
        report.matches_literal, report.matches_eq, report.matches_field
    );

    // Save: replace the whole document by id, inserting when it has none.
    if let Some(mut found) = people.find_one(filters::literal_name(&name)).await? {
        found.age = f64::from(generator.rng_mut().gen_range(1..200_i32));
        let by_id = match found.id {
            Some(id) => filters::literal_field(PersonField::Id, id),
            None => filters::literal_name(&name),
        };
        people.replace_one(by_id, &found).upsert(true).await?;
        info!("saved {} with age {}", found.name, found.age);
        report.saved_age = Some(found.age);
    } else {
        warn!("nothing named {name} to save");
    }

    // Update.
    let age: i32 = generator.rng_mut().gen_range(1..200);
    let updated = people
        .update_many(filters::literal_name(&name), filters::set([("age", age)]))
        .await?;
    report.updated_matched = updated.matched_count;
    report.updated_modified = updated.modified_count;
    info!(
        "update matched {} modified {}",
        updated.matched_count, updated.modified_count
    );

    // Find-and-modify on the oldest match.
    report.find_and_modify = people
        .find_one_and_update(
            filters::and([
                filters::literal_name(&name),
                filters::field_eq(PersonField::Sex, true),
            ]),
            filters::set([("age", Bson::Int32(112)), ("sex", Bson::Boolean(false))]),
        )
        .sort(filters::descending(PersonField::Age))
        .return_document(ReturnDocument::After)
        .await?;
    match &report.find_and_modify {
        Some(p) => info!("find-and-modify left {} at age {} sex {}", p.name, p.age, p.sex),
        None => info!("find-and-modify matched nothing"),
    }

    // Range query.
    let in_range: Vec<Person> = people
        .find(filters::age_between(90, 100))
        .await?
        .try_collect()
        .await?;
    info!("{} people aged 91..=99", in_range.len());
    report.range_first = in_range.first().cloned();
    report.range_last = in_range.last().cloned();

    Ok(report)
}

async fn count(people: &Collection<Person>, filter: Document) -> Result<usize> {
    let found: Vec<Person> = people.find(filter).await?.try_collect().await?;
    Ok(found.len())
}
