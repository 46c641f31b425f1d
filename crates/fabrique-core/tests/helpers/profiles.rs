//! Blog-style sample models and profiles.

use fabrique_core::prelude::*;
use serde_json::{Value, json};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: Option<u64>,
	pub name: String,
	pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
	pub id: Option<u64>,
	pub body: String,
	pub user: Option<User>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
	pub id: Option<u64>,
	pub title: String,
	pub body: String,
	pub author: Option<User>,
	pub comments: Vec<Comment>,
}

pub struct UserProfile;

impl Profile for UserProfile {
	fn register(&self, blueprint: &mut Blueprint) {
		blueprint
			.set_model::<User>()
			.define(|faker: SharedFaker| async move {
				Attributes::new()
					.set("name", faker.name())
					.set("email", faker.email())
			})
			.state("admin", json!({"name": "admin"}))
			.after_creating_state("admin", |mut entity: Entity, _factory: EntityFactory| async move {
				let id = entity.get("id").cloned().unwrap_or(Value::Null);
				entity.set("email", format!("admin+{}@example.com", id));
				Ok::<_, FixtureError>(entity)
			});
	}
}

pub struct CommentProfile;

impl Profile for CommentProfile {
	fn register(&self, blueprint: &mut Blueprint) {
		blueprint
			.set_model::<Comment>()
			.define(|faker: SharedFaker| async move {
				Attributes::new().set("body", faker.sentence(3, 8))
			})
			.state("with-user", |_faker: SharedFaker| async {
				Attributes::new().deferred("user", |factory: EntityFactory| async move {
					factory
						.for_type::<User>()
						.create_one()
						.await
						.map(Entity::into_value)
				})
			});
	}
}

pub struct PostProfile;

impl Profile for PostProfile {
	fn register(&self, blueprint: &mut Blueprint) {
		blueprint
			.set_model::<Post>()
			.define(|faker: SharedFaker| async move {
				Attributes::new()
					.set("title", faker.catch_phrase())
					.set("body", faker.paragraphs(2, "\n\n"))
			})
			.state("with-author", |_faker: SharedFaker| async {
				Attributes::new().deferred("author", |factory: EntityFactory| async move {
					factory
						.for_type::<User>()
						.create_one()
						.await
						.map(Entity::into_value)
				})
			})
			.state("with-comments", |_faker: SharedFaker| async {
				Attributes::new().deferred("comments", |factory: EntityFactory| async move {
					let comments = factory
						.for_type::<Comment>()
						.state("with-user")
						.count(3)
						.create()
						.await?;
					Ok::<_, FixtureError>(Value::Array(
						comments.into_iter().map(Entity::into_value).collect(),
					))
				})
			});
	}
}

/// String-keyed entity with lifecycle callbacks.
pub fn widget_profile(blueprint: &mut Blueprint) {
	blueprint
		.set_type("widget")
		.define(|faker: SharedFaker| async move {
			Attributes::new()
				.set("name", faker.word())
				.set("active", false)
		})
		.state("active", json!({"active": true}))
		.after_making(|mut entity: Entity, _factory: EntityFactory| async move {
			entity.set("made", true);
			Ok::<_, FixtureError>(entity)
		})
		.after_creating(|mut entity: Entity, _factory: EntityFactory| async move {
			entity.set("created", true);
			Ok::<_, FixtureError>(entity)
		})
		.after_creating_state("active", |mut entity: Entity, _factory: EntityFactory| async move {
			entity.set("activated", true);
			Ok::<_, FixtureError>(entity)
		});
}
