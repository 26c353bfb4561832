/// Which roles may flag their own reservation as volunteer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerPolicy {
    roles: Vec<String>,
}

impl VolunteerPolicy {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_eligible(&self, status: Option<&str>) -> bool {
        match status {
            Some(status) => self.roles.iter().any(|role| role == status.trim()),
            None => false,
        }
    }
}

impl Default for VolunteerPolicy {
    fn default() -> Self {
        Self::new(["Moniteur", "Bar"])
    }
}
