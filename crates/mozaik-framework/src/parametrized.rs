// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use mozaik_structures::{check_parameters, MozaikResult, ParameterSet, RequiredParameters};

/// An object configured through a declared parameter tree.
///
/// `required_parameters` returns the complete tree, including whatever the object
/// inherits; build it with [`RequiredParameters::merged`] when extending another
/// component's requirements.
pub trait Parametrized {
    const NAME: &'static str;

    fn required_parameters() -> RequiredParameters;

    fn check_parameters(parameters: &ParameterSet) -> MozaikResult<()> {
        check_parameters(Self::NAME, &Self::required_parameters(), parameters)
    }
}

/// Parameters that have passed validation for `T`.
pub struct ParametrizedObject<T: Parametrized> {
    parameters: ParameterSet,
    _owner: PhantomData<fn() -> T>,
}

impl<T: Parametrized> ParametrizedObject<T> {
    pub fn new(parameters: ParameterSet) -> MozaikResult<Self> {
        T::check_parameters(&parameters)?;
        Ok(ParametrizedObject {
            parameters,
            _owner: PhantomData,
        })
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn into_parameters(self) -> ParameterSet {
        self.parameters
    }
}

impl<T: Parametrized> Clone for ParametrizedObject<T> {
    fn clone(&self) -> Self {
        ParametrizedObject {
            parameters: self.parameters.clone(),
            _owner: PhantomData,
        }
    }
}

impl<T: Parametrized> Debug for ParametrizedObject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametrizedObject")
            .field("owner", &T::NAME)
            .field("parameters", &self.parameters)
            .finish()
    }
}
