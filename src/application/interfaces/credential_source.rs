/// A place a secret can be looked up by logical name.
pub trait CredentialSource: Send + Sync {
    /// Return the token stored under `key`, or `None` when this source has nothing.
    fn lookup(&self, key: &str) -> Option<String>;

    fn describe(&self) -> String;
}
