/// Expands a selection's actions into the full set of actions the policy must grant.
///
/// The engine calls this once per selection when compiling, with the
/// resource's service prefix (e.g. `s3`) and the actions the user picked.
/// The result should contain no duplicates; its order does not matter.
///
/// Any `Fn(&str, &[String]) -> Vec<String>` is a resolver:
///
/// ```rust
/// use policy_composer_core::PolicyEngine;
///
/// let mut engine = PolicyEngine::new();
/// engine.set_dependency_resolver(|_service: &str, actions: &[String]| actions.to_vec());
/// ```
pub trait DependencyResolver: Send {
    fn resolve(&self, service: &str, actions: &[String]) -> Vec<String>;
}

impl<F> DependencyResolver for F
where
    F: Fn(&str, &[String]) -> Vec<String> + Send,
{
    fn resolve(&self, service: &str, actions: &[String]) -> Vec<String> {
        self(service, actions)
    }
}
