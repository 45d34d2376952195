//! Element-wise application of string transformations
//!
//! Every helper has a scalar form taking `&str` and an `_all` form taking any
//! [`StringCollection`]. Keyed collections keep their keys, sequences keep
//! their order.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A collection whose string elements can be transformed one by one
pub trait StringCollection {
    /// Same shape, holding owned strings
    type Output;

    /// Apply `f` to every element
    fn map_strings<F>(self, f: F) -> Self::Output
    where
        F: FnMut(&str) -> String;
}

impl<S: AsRef<str>> StringCollection for Vec<S> {
    type Output = Vec<String>;

    fn map_strings<F>(self, mut f: F) -> Self::Output
    where
        F: FnMut(&str) -> String,
    {
        self.iter().map(|item| f(item.as_ref())).collect()
    }
}

impl<S: AsRef<str>> StringCollection for &[S] {
    type Output = Vec<String>;

    fn map_strings<F>(self, mut f: F) -> Self::Output
    where
        F: FnMut(&str) -> String,
    {
        self.iter().map(|item| f(item.as_ref())).collect()
    }
}

impl<S: AsRef<str>, const N: usize> StringCollection for [S; N] {
    type Output = [String; N];

    fn map_strings<F>(self, mut f: F) -> Self::Output
    where
        F: FnMut(&str) -> String,
    {
        self.map(|item| f(item.as_ref()))
    }
}

impl<K: Ord, S: AsRef<str>> StringCollection for BTreeMap<K, S> {
    type Output = BTreeMap<K, String>;

    fn map_strings<F>(self, mut f: F) -> Self::Output
    where
        F: FnMut(&str) -> String,
    {
        self.into_iter()
            .map(|(key, value)| {
                let value = f(value.as_ref());
                (key, value)
            })
            .collect()
    }
}

impl<K, V, H> StringCollection for HashMap<K, V, H>
where
    K: Eq + Hash,
    V: AsRef<str>,
    H: BuildHasher + Default,
{
    type Output = HashMap<K, String, H>;

    fn map_strings<F>(self, mut f: F) -> Self::Output
    where
        F: FnMut(&str) -> String,
    {
        self.into_iter()
            .map(|(key, value)| {
                let value = f(value.as_ref());
                (key, value)
            })
            .collect()
    }
}
