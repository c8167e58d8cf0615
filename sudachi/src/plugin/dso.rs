/*
 *  Copyright (c) 2021 Works Applications Co., Ltd.
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Macros for declaring plugins that can be compiled into a `cdylib` and
//! loaded at runtime with [`libloading`](crate::plugin::loader).
//!
//! Every category shares the same convention: the generated function is
//! named `load_plugin`, takes no arguments, and returns
//! `SudachiResult<Box<dyn Trait + Sync + Send>>`. [`PluginLoader`] looks up
//! exactly this symbol when a config entry's `class` does not match a
//! bundled (statically linked) implementation.
//!
//! [`PluginLoader`]: crate::plugin::loader::PluginCategory

/// Declares a dynamically loadable [`InputTextPlugin`](crate::plugin::input_text::InputTextPlugin).
#[macro_export]
macro_rules! declare_input_text_plugin {
    ($plugin_type:ty, $constructor:path) => {
        #[no_mangle]
        pub fn load_plugin(
        ) -> $crate::error::SudachiResult<Box<dyn $crate::plugin::input_text::InputTextPlugin + Sync + Send>>
        {
            let constructor: fn() -> $plugin_type = $constructor;
            let object = constructor();
            let boxed: Box<dyn $crate::plugin::input_text::InputTextPlugin + Sync + Send> =
                Box::new(object);
            Ok(boxed)
        }
    };
}

/// Declares a dynamically loadable [`OovProviderPlugin`](crate::plugin::oov::OovProviderPlugin).
#[macro_export]
macro_rules! declare_oov_provider_plugin {
    ($plugin_type:ty, $constructor:path) => {
        #[no_mangle]
        pub fn load_plugin(
        ) -> $crate::error::SudachiResult<Box<dyn $crate::plugin::oov::OovProviderPlugin + Sync + Send>>
        {
            let constructor: fn() -> $plugin_type = $constructor;
            let object = constructor();
            let boxed: Box<dyn $crate::plugin::oov::OovProviderPlugin + Sync + Send> =
                Box::new(object);
            Ok(boxed)
        }
    };
}

/// Declares a dynamically loadable [`PathRewritePlugin`](crate::plugin::path_rewrite::PathRewritePlugin).
#[macro_export]
macro_rules! declare_path_rewrite_plugin {
    ($plugin_type:ty, $constructor:path) => {
        #[no_mangle]
        pub fn load_plugin(
        ) -> $crate::error::SudachiResult<Box<dyn $crate::plugin::path_rewrite::PathRewritePlugin + Sync + Send>>
        {
            let constructor: fn() -> $plugin_type = $constructor;
            let object = constructor();
            let boxed: Box<dyn $crate::plugin::path_rewrite::PathRewritePlugin + Sync + Send> =
                Box::new(object);
            Ok(boxed)
        }
    };
}

/// Declares a dynamically loadable [`EditConnectionCostPlugin`](crate::plugin::connect_cost::EditConnectionCostPlugin).
#[macro_export]
macro_rules! declare_connect_cost_plugin {
    ($plugin_type:ty, $constructor:path) => {
        #[no_mangle]
        pub fn load_plugin(
        ) -> $crate::error::SudachiResult<
            Box<dyn $crate::plugin::connect_cost::EditConnectionCostPlugin + Sync + Send>,
        > {
            let constructor: fn() -> $plugin_type = $constructor;
            let object = constructor();
            let boxed: Box<dyn $crate::plugin::connect_cost::EditConnectionCostPlugin + Sync + Send> =
                Box::new(object);
            Ok(boxed)
        }
    };
}
