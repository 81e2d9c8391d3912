use std::{
    collections::{BTreeMap, HashMap},
    env::{self, VarError},
    hash::BuildHasher,
};

/// A source of environment variables, queried one name at a time
pub trait Lookup {
    /// Fetch the value of `key`, with the same contract as [`std::env::var`]
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        // Names the OS can never hold are simply unset
        if key.is_empty() || key.contains(['=', '\0']) {
            return Err(VarError::NotPresent);
        }
        env::var(key)
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl Lookup for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_lookup() {
        let env = HashMap::from([("PORT".to_string(), "8080".to_string())]);
        assert_eq!(env.var("PORT"), Ok("8080".to_string()));
        assert_eq!(env.var("HOST"), Err(VarError::NotPresent));
    }

    #[test]
    fn test_btreemap_lookup() {
        let env = BTreeMap::from([("HOST".to_string(), String::new())]);
        assert_eq!(env.var("HOST"), Ok(String::new()));
        assert_eq!(env.var("PORT"), Err(VarError::NotPresent));
    }

    #[test]
    fn test_reference_lookup() {
        let env = HashMap::from([("A".to_string(), "1".to_string())]);
        let by_ref: &dyn Lookup = &env;
        assert_eq!((&by_ref).var("A"), Ok("1".to_string()));
    }

    #[test]
    fn test_process_env_rejects_impossible_names() {
        assert_eq!(ProcessEnv.var(""), Err(VarError::NotPresent));
        assert_eq!(ProcessEnv.var("A=B"), Err(VarError::NotPresent));
        assert_eq!(ProcessEnv.var("A\0B"), Err(VarError::NotPresent));
    }

    #[test]
    fn test_process_env_unset() {
        assert_eq!(
            ProcessEnv.var("ENV_POPULATE_SURELY_UNSET_VARIABLE"),
            Err(VarError::NotPresent)
        );
    }
}
