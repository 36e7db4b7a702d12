use smol_str::SmolStr;

/// A PDF name, stored including its leading `/`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Name {
    data: SmolStr,
}

impl Name {
    /// The name without its leading slash, as dictionary keys store it.
    pub fn as_key(&self) -> &str {
        self.data.strip_prefix('/').unwrap_or(&self.data)
    }

    pub fn serialize(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.data.as_bytes());
    }
}

impl<T: std::convert::Into<SmolStr>> From<T> for Name {
    fn from(value: T) -> Self {
        Self { data: value.into() }
    }
}

impl std::ops::Deref for Name {
    type Target = SmolStr;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
