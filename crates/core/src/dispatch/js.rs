// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JS embedded session (`spec.md` §4.6): `console`, `sdk`, `argv`,
//! `Game_Root`/`Project_Root`/`script_dir`, `progress`, `Diagnostics`, and
//! shim modules for legacy `require("lfs" | "dkjson" | "debug")` calls.

use std::path::Path;

use boa_engine::object::builtins::JsArray;
use boa_engine::property::Attribute;
use boa_engine::{js_string, Context, JsNativeError, JsResult, JsValue, NativeFunction, Source};

use crate::sdk::Sdk;

pub fn run(script_path: &Path, argv: &[String], sdk: &Sdk, repo_root: &Path) -> Result<(), String> {
    let mut context = Context::default();
    install_console(&mut context, sdk.clone()).map_err(|e| e.to_string())?;
    install_sdk_object(&mut context, sdk.clone()).map_err(|e| e.to_string())?;
    install_globals(&mut context, argv, script_path, repo_root).map_err(|e| e.to_string())?;
    install_require_shims(&mut context).map_err(|e| e.to_string())?;

    let source = std::fs::read_to_string(script_path).map_err(|e| e.to_string())?;
    context
        .eval(Source::from_bytes(&source))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn native(
    context: &mut Context,
    object: &boa_engine::JsObject,
    name: &str,
    len: usize,
    f: impl Fn(&JsValue, &[JsValue], &mut Context) -> JsResult<JsValue> + 'static,
) -> JsResult<()> {
    #[allow(unsafe_code)]
    // SAFETY: `f` only captures plain Rust (non-GC-traced) state such as `Sdk`'s
    // `Arc` fields, so there is nothing here the boa garbage collector needs to trace.
    let function = unsafe { NativeFunction::from_closure(move |this, args, ctx| f(this, args, ctx)) }
        .to_js_function(context.realm());
    object.set(js_string!(name), function, false, context)?;
    let _ = len;
    Ok(())
}

fn install_console(context: &mut Context, sdk: Sdk) -> JsResult<()> {
    let console = boa_engine::JsObject::with_object_proto(context.intrinsics());

    let log_sdk = sdk.clone();
    native(context, &console, "log", 1, move |_, args, _| {
        log_sdk.print(&join_args(args), None);
        Ok(JsValue::undefined())
    })?;

    let warn_sdk = sdk.clone();
    native(context, &console, "warn", 1, move |_, args, _| {
        warn_sdk.warn(&join_args(args));
        Ok(JsValue::undefined())
    })?;

    let error_sdk = sdk;
    native(context, &console, "error", 1, move |_, args, _| {
        error_sdk.error(&join_args(args));
        Ok(JsValue::undefined())
    })?;

    context.register_global_property(js_string!("console"), console, Attribute::all())?;
    Ok(())
}

fn install_sdk_object(context: &mut Context, sdk: Sdk) -> JsResult<()> {
    let object = boa_engine::JsObject::with_object_proto(context.intrinsics());

    let print_sdk = sdk.clone();
    native(context, &object, "print", 2, move |_, args, _| {
        let message = arg_string(args, 0);
        let color = args.get(1).and_then(JsValue::as_string).map(|s| s.to_std_string_escaped());
        print_sdk.print(&message, color.as_deref());
        Ok(JsValue::undefined())
    })?;

    let warn_sdk = sdk.clone();
    native(context, &object, "warn", 1, move |_, args, _| {
        warn_sdk.warn(&arg_string(args, 0));
        Ok(JsValue::undefined())
    })?;

    let sha1_sdk = sdk.clone();
    native(context, &object, "sha1_file", 1, move |_, args, _| {
        let path = arg_string(args, 0);
        sha1_sdk
            .sha1_file(Path::new(&path))
            .map(|hash| JsValue::from(js_string!(hash)))
            .map_err(|e| JsNativeError::error().with_message(e.to_string()).into())
    })?;

    let md5_sdk = sdk;
    native(context, &object, "md5", 1, move |_, args, _| {
        Ok(JsValue::from(js_string!(md5_sdk.md5(&arg_string(args, 0)))))
    })?;

    context.register_global_property(js_string!("sdk"), object, Attribute::all())?;
    Ok(())
}

fn install_globals(
    context: &mut Context,
    argv: &[String],
    script_path: &Path,
    repo_root: &Path,
) -> JsResult<()> {
    let array = JsArray::new(context);
    for arg in argv {
        array.push(js_string!(arg.as_str()), context)?;
    }
    context.register_global_property(js_string!("argv"), array, Attribute::all())?;
    context.register_global_property(
        js_string!("argc"),
        JsValue::from(argv.len() as i32),
        Attribute::all(),
    )?;
    context.register_global_property(
        js_string!("Game_Root"),
        js_string!(repo_root.to_string_lossy().as_ref()),
        Attribute::all(),
    )?;
    context.register_global_property(
        js_string!("script_dir"),
        js_string!(script_path.parent().unwrap_or(repo_root).to_string_lossy().as_ref()),
        Attribute::all(),
    )?;
    context.register_global_property(js_string!("DEBUG"), JsValue::from(false), Attribute::all())?;
    Ok(())
}

/// Legacy scripts `require("lfs" | "dkjson" | "debug")`; bind a global
/// `require` that returns an empty object for those names and throws
/// otherwise, so old scripts keep loading without those modules' full
/// functionality (`spec.md` §4.6).
fn install_require_shims(context: &mut Context) -> JsResult<()> {
    let function = NativeFunction::from_fn_ptr(|_, args, context| {
        let name = arg_string(args, 0);
        match name.as_str() {
            "lfs" | "dkjson" | "debug" => {
                Ok(JsValue::from(boa_engine::JsObject::with_object_proto(context.intrinsics())))
            }
            other => {
                Err(JsNativeError::typ().with_message(format!("module not found: {other}")).into())
            }
        }
    })
    .to_js_function(context.realm());
    context.register_global_property(js_string!("require"), function, Attribute::all())?;
    Ok(())
}

fn arg_string(args: &[JsValue], index: usize) -> String {
    args.get(index)
        .and_then(JsValue::as_string)
        .map(|s| s.to_std_string_escaped())
        .unwrap_or_default()
}

fn join_args(args: &[JsValue]) -> String {
    (0..args.len()).map(|i| arg_string(args, i)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "js_tests.rs"]
mod tests;
