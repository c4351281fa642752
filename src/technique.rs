use std::{
    borrow::Borrow,
    fmt, iter, slice,
    str::FromStr,
    sync::{Mutex, PoisonError},
};

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::current_num_threads;
#[cfg(feature = "rayon")]
use rayon_cond::CondIterator;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub trait Concatenation {
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync;

    /// An out-of-range `index` omits nothing.
    fn concat_skipping<S>(&self, tokens: &[S], index: usize) -> String
    where
        S: Borrow<str> + Sync,
    {
        let kept: Vec<&str> = skipping(tokens, index).map(Borrow::<str>::borrow).collect();
        self.concat(&kept)
    }
}

fn skipping<S>(
    tokens: &[S],
    index: usize,
) -> iter::Chain<slice::Iter<'_, S>, slice::Iter<'_, S>> {
    let (head, tail) = if index < tokens.len() {
        (&tokens[..index], &tokens[index + 1..])
    } else {
        (tokens, &tokens[tokens.len()..])
    };
    head.iter().chain(tail)
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormatConcat;

impl Concatenation for FormatConcat {
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        let mut combined = String::new();
        for token in tokens.iter().map(Borrow::<str>::borrow) {
            combined = format!("{combined}{token}");
        }
        combined
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlusConcat;

impl Concatenation for PlusConcat {
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        let mut combined = String::new();
        for token in tokens.iter().map(Borrow::<str>::borrow) {
            // `String + &str` would append in place; keep the left operand immutable
            combined = combined.as_str().to_owned() + token;
        }
        combined
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct BuilderConcat;

impl BuilderConcat {
    #[inline]
    fn build<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
        let mut buf = String::new();
        for token in tokens {
            buf.push_str(token);
        }
        buf.shrink_to_fit();
        buf
    }
}

impl Concatenation for BuilderConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(tokens.iter().map(Borrow::<str>::borrow))
    }

    #[inline]
    fn concat_skipping<S>(&self, tokens: &[S], index: usize) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(skipping(tokens, index).map(Borrow::<str>::borrow))
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SyncBuilderConcat;

impl SyncBuilderConcat {
    fn build<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
        let buf = Mutex::new(String::new());
        for token in tokens {
            buf.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_str(token);
        }
        buf.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Concatenation for SyncBuilderConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(tokens.iter().map(Borrow::<str>::borrow))
    }

    #[inline]
    fn concat_skipping<S>(&self, tokens: &[S], index: usize) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(skipping(tokens, index).map(Borrow::<str>::borrow))
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct JoinConcat;

impl Concatenation for JoinConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        tokens.join("")
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainedConcat;

impl ChainedConcat {
    fn build<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
        let mut combined = String::new();
        for token in tokens {
            combined = [combined.as_str(), token].concat();
        }
        combined
    }
}

impl Concatenation for ChainedConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(tokens.iter().map(Borrow::<str>::borrow))
    }

    #[inline]
    fn concat_skipping<S>(&self, tokens: &[S], index: usize) -> String
    where
        S: Borrow<str> + Sync,
    {
        Self::build(skipping(tokens, index).map(Borrow::<str>::borrow))
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct LibraryJoinConcat;

impl Concatenation for LibraryJoinConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        ::itertools::join(tokens.iter().map(Borrow::<str>::borrow), "")
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct FluentJoinConcat;

impl Concatenation for FluentJoinConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        tokens
            .iter()
            .map(Borrow::<str>::borrow)
            .format("")
            .to_string()
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct CollectConcat;

impl Concatenation for CollectConcat {
    #[inline]
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        tokens.iter().map(Borrow::<str>::borrow).collect()
    }
}

#[cfg(feature = "rayon")]
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParallelCollectConcat;

#[cfg(feature = "rayon")]
impl ParallelCollectConcat {
    #[inline]
    pub fn is_parallel(len: usize) -> bool {
        len >= 5 * current_num_threads()
    }
}

#[cfg(feature = "rayon")]
impl Concatenation for ParallelCollectConcat {
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        CondIterator::new(tokens, Self::is_parallel(tokens.len()))
            .map(Borrow::<str>::borrow)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Complexity {
    Linear,
    LinearLocked,
    Quadratic,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("O(n)"),
            Self::LinearLocked => f.write_str("O(n) + lock"),
            Self::Quadratic => f.write_str("O(n^2)"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technique {
    Format,
    Plus,
    Builder,
    SyncBuilder,
    Join,
    Concat,
    LibraryJoin,
    FluentJoin,
    Collect,
    #[cfg(feature = "rayon")]
    ParallelCollect,
}

impl Technique {
    pub const ALL: [Self; 9] = [
        Self::Format,
        Self::Plus,
        Self::Builder,
        Self::SyncBuilder,
        Self::Join,
        Self::Concat,
        Self::LibraryJoin,
        Self::FluentJoin,
        Self::Collect,
    ];

    pub fn extended() -> Vec<Self> {
        #[allow(unused_mut)]
        let mut techniques = Self::ALL.to_vec();
        #[cfg(feature = "rayon")]
        techniques.push(Self::ParallelCollect);
        techniques
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Plus => "plus",
            Self::Builder => "builder",
            Self::SyncBuilder => "sync-builder",
            Self::Join => "join",
            Self::Concat => "concat",
            Self::LibraryJoin => "library-join",
            Self::FluentJoin => "fluent-join",
            Self::Collect => "collect",
            #[cfg(feature = "rayon")]
            Self::ParallelCollect => "parallel-collect",
        }
    }

    pub const fn complexity(&self) -> Complexity {
        match self {
            Self::Format | Self::Plus | Self::Concat => Complexity::Quadratic,
            Self::SyncBuilder => Complexity::LinearLocked,
            Self::Builder
            | Self::Join
            | Self::LibraryJoin
            | Self::FluentJoin
            | Self::Collect => Complexity::Linear,
            #[cfg(feature = "rayon")]
            Self::ParallelCollect => Complexity::Linear,
        }
    }

    pub const fn skips_legacy_token(&self) -> bool {
        matches!(self, Self::Builder | Self::SyncBuilder | Self::Concat)
    }
}

impl Concatenation for Technique {
    fn concat<S>(&self, tokens: &[S]) -> String
    where
        S: Borrow<str> + Sync,
    {
        match self {
            Self::Format => FormatConcat.concat(tokens),
            Self::Plus => PlusConcat.concat(tokens),
            Self::Builder => BuilderConcat.concat(tokens),
            Self::SyncBuilder => SyncBuilderConcat.concat(tokens),
            Self::Join => JoinConcat.concat(tokens),
            Self::Concat => ChainedConcat.concat(tokens),
            Self::LibraryJoin => LibraryJoinConcat.concat(tokens),
            Self::FluentJoin => FluentJoinConcat.concat(tokens),
            Self::Collect => CollectConcat.concat(tokens),
            #[cfg(feature = "rayon")]
            Self::ParallelCollect => ParallelCollectConcat.concat(tokens),
        }
    }

    fn concat_skipping<S>(&self, tokens: &[S], index: usize) -> String
    where
        S: Borrow<str> + Sync,
    {
        match self {
            Self::Format => FormatConcat.concat_skipping(tokens, index),
            Self::Plus => PlusConcat.concat_skipping(tokens, index),
            Self::Builder => BuilderConcat.concat_skipping(tokens, index),
            Self::SyncBuilder => SyncBuilderConcat.concat_skipping(tokens, index),
            Self::Join => JoinConcat.concat_skipping(tokens, index),
            Self::Concat => ChainedConcat.concat_skipping(tokens, index),
            Self::LibraryJoin => LibraryJoinConcat.concat_skipping(tokens, index),
            Self::FluentJoin => FluentJoinConcat.concat_skipping(tokens, index),
            Self::Collect => CollectConcat.concat_skipping(tokens, index),
            #[cfg(feature = "rayon")]
            Self::ParallelCollect => ParallelCollectConcat.concat_skipping(tokens, index),
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::extended()
            .into_iter()
            .find(|technique| technique.name() == s)
            .ok_or_else(|| Error::UnknownTechnique(s.into()))
    }
}
