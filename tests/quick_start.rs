//! Facade smoke tests: everything is reachable through `fabrique::prelude`.

use fabrique::prelude::*;
use rstest::rstest;
use serde_json::json;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Post {
	id: Option<u64>,
	title: String,
	published: bool,
}

struct PostProfile;

impl Profile for PostProfile {
	fn register(&self, blueprint: &mut Blueprint) {
		blueprint
			.set_model::<Post>()
			.define(|faker: SharedFaker| async move {
				Attributes::new().set("title", faker.catch_phrase())
			})
			.state("published", json!({"published": true}));
	}
}

#[rstest]
#[tokio::test]
async fn test_quick_start() {
	let factory = EntityFactory::builder()
		.faker(FakeDataProvider::seeded(1).shared())
		.profile(PostProfile)
		.build()
		.unwrap();

	let posts: Vec<Post> = factory
		.for_type::<Post>()
		.state("published")
		.count(2)
		.create_as()
		.await
		.unwrap();

	assert_eq!(posts.len(), 2);
	assert_eq!(posts[0].id, Some(1));
	assert_eq!(posts[1].id, Some(2));
	assert!(posts.iter().all(|post| post.published && !post.title.is_empty()));
}

#[rstest]
#[tokio::test]
async fn test_unknown_state_message() {
	let factory = EntityFactory::builder().profile(PostProfile).build().unwrap();

	let error = factory
		.for_type::<Post>()
		.state("draft")
		.make()
		.await
		.unwrap_err();

	assert_eq!(
		error.to_string(),
		"Factory method not defined for entity Post, state: draft"
	);
}
