//! Narrow capabilities the host grants over its crew records.

use kerbonaut_config::CrewAttributes;

/// Numeric crew attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrewAttribute {
    /// Courage, 0.0 - 1.0.
    Courage,
    /// Stupidity, 0.0 - 1.0.
    Stupidity,
}

/// A crew member's persistent record, as far as cosmetics may touch it.
pub trait CrewMember {
    /// Display name, e.g. `Jebediah Kerman`.
    fn name(&self) -> &str;

    /// Sets the experience trait (profession).
    fn set_experience_trait(&mut self, experience_trait: &str);

    /// Sets a numeric attribute.
    fn set_attribute(&mut self, attribute: CrewAttribute, value: f32);

    /// Sets the badass flag.
    fn set_badass(&mut self, badass: bool);
}

/// Writes `attributes` to `crew`. An absent or empty trait leaves the
/// current one alone.
pub fn apply_attributes(crew: &mut dyn CrewMember, attributes: &CrewAttributes) {
    if let Some(experience_trait) = attributes.experience_trait.as_deref().filter(|t| !t.is_empty()) {
        crew.set_experience_trait(experience_trait);
    }
    crew.set_attribute(CrewAttribute::Courage, attributes.courage);
    crew.set_attribute(CrewAttribute::Stupidity, attributes.stupidity);
    crew.set_badass(attributes.is_badass);
}
