//! Reusable blueprint declarations.

use crate::blueprint::Blueprint;

/// Declares a blueprint in one place: its type, base definition, states and
/// hooks.
///
/// # Example
///
/// ```ignore
/// struct PostProfile;
///
/// impl Profile for PostProfile {
///     fn register(&self, blueprint: &mut Blueprint) {
///         blueprint
///             .set_model::<Post>()
///             .define(|faker: SharedFaker| async move {
///                 Attributes::new()
///                     .set("title", faker.catch_phrase())
///                     .set("body", faker.paragraphs(2, "\n\n"))
///             })
///             .state("with-author", |_faker: SharedFaker| async {
///                 Attributes::new().deferred("author", |factory| async move {
///                     factory.for_type::<User>().create_one().await.map(Entity::into_value)
///                 })
///             });
///     }
/// }
/// ```
pub trait Profile: Send + Sync {
	/// Registers the profile's definitions on `blueprint`.
	fn register(&self, blueprint: &mut Blueprint);
}

impl<F> Profile for F
where
	F: Fn(&mut Blueprint) + Send + Sync,
{
	fn register(&self, blueprint: &mut Blueprint) {
		self(blueprint)
	}
}
