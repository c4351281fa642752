use std::{io, ops, slice};

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Builder;

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet {
    tokens: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Fixture {
    Tokens(Vec<String>),
    Object { tokens: Vec<String> },
}

impl From<Fixture> for InputSet {
    #[inline]
    fn from(fixture: Fixture) -> Self {
        match fixture {
            Fixture::Tokens(tokens) | Fixture::Object { tokens } => Self { tokens },
        }
    }
}

impl InputSet {
    pub fn generate(len: usize) -> Result<Self> {
        Self::generate_with(&mut OsRng, len)
    }

    pub fn generate_with<R>(rng: &mut R, len: usize) -> Result<Self>
    where
        R: ?Sized + RngCore,
    {
        let tokens = (0..len)
            .map(|_| random_token(&mut *rng))
            .collect::<Result<Vec<_>>>()?;
        debug!(len, "generated input tokens");
        Ok(Self { tokens })
    }

    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    // accepts a bare array or `{"tokens": [...]}`
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: io::Read,
    {
        let fixture: Fixture = ::serde_json::from_reader(reader)?;
        Ok(fixture.into())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let fixture: Fixture = ::serde_json::from_str(s)?;
        Ok(fixture.into())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.tokens.iter()
    }
}

fn random_token<R>(rng: &mut R) -> Result<String>
where
    R: ?Sized + RngCore,
{
    let mut bytes = [0u8; 16];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
}

impl AsRef<[String]> for InputSet {
    #[inline]
    fn as_ref(&self) -> &[String] {
        &self.tokens
    }
}

impl ops::Index<usize> for InputSet {
    type Output = String;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a InputSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
