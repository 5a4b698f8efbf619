// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lua embedded session (`spec.md` §4.6): safe globals, SDK table, `argv`.

use std::path::Path;

use mlua::{Lua, MultiValue, Value as LuaValue, Variadic};

use crate::sdk::Sdk;

/// Run a Lua script with a restricted global environment: no
/// `io.popen`/`os.execute`/arbitrary `loadfile`/`dofile`.
pub fn run(script_path: &Path, argv: &[String], sdk: &Sdk) -> Result<(), String> {
    let lua = Lua::new();
    install_safe_globals(&lua).map_err(|e| e.to_string())?;
    install_sdk_table(&lua, sdk.clone()).map_err(|e| e.to_string())?;

    let argv_table = lua.create_table().map_err(|e| e.to_string())?;
    for (i, arg) in argv.iter().enumerate() {
        argv_table.set(i + 1, arg.clone()).map_err(|e| e.to_string())?;
    }
    lua.globals().set("argv", argv_table).map_err(|e| e.to_string())?;
    lua.globals().set("argc", argv.len() as i64).map_err(|e| e.to_string())?;

    let source = std::fs::read_to_string(script_path).map_err(|e| e.to_string())?;
    lua.load(&source)
        .set_name(script_path.to_string_lossy().as_ref())
        .exec()
        .map_err(|e| e.to_string())
}

fn install_safe_globals(lua: &Lua) -> mlua::Result<()> {
    let globals = lua.globals();
    if let Ok(io) = globals.get::<mlua::Table>("io") {
        io.set("popen", LuaValue::Nil)?;
        io.set("open", LuaValue::Nil)?;
    }
    if let Ok(os) = globals.get::<mlua::Table>("os") {
        os.set("execute", LuaValue::Nil)?;
        os.set("remove", LuaValue::Nil)?;
        os.set("rename", LuaValue::Nil)?;
    }
    globals.set("loadfile", LuaValue::Nil)?;
    globals.set("dofile", LuaValue::Nil)?;
    Ok(())
}

fn install_sdk_table(lua: &Lua, sdk: Sdk) -> mlua::Result<()> {
    let table = lua.create_table()?;

    let print_sdk = sdk.clone();
    table.set(
        "print",
        lua.create_function(move |_, (msg, color): (String, Option<String>)| {
            print_sdk.print(&msg, color.as_deref());
            Ok(())
        })?,
    )?;

    let warn_sdk = sdk.clone();
    table.set(
        "warn",
        lua.create_function(move |_, msg: String| {
            warn_sdk.warn(&msg);
            Ok(())
        })?,
    )?;

    let error_sdk = sdk.clone();
    table.set(
        "error",
        lua.create_function(move |_, msg: String| {
            error_sdk.error(&msg);
            Ok(())
        })?,
    )?;

    let sha1_sdk = sdk.clone();
    table.set(
        "sha1_file",
        lua.create_function(move |_, path: String| {
            sha1_sdk.sha1_file(Path::new(&path)).map_err(mlua::Error::external)
        })?,
    )?;

    let md5_sdk = sdk.clone();
    table.set(
        "md5",
        lua.create_function(move |_, text: String| Ok(md5_sdk.md5(&text)))?,
    )?;

    let write_sdk = sdk.clone();
    table.set(
        "write_file",
        lua.create_function(move |_, (path, contents): (String, mlua::String)| {
            crate::sdk::fs::write_file(&write_sdk.allowlist, Path::new(&path), &contents.as_bytes())
                .map_err(mlua::Error::external)
        })?,
    )?;

    let read_sdk = sdk.clone();
    table.set(
        "read_file",
        lua.create_function(move |lua, path: String| {
            let bytes = crate::sdk::fs::read_file(&read_sdk.allowlist, Path::new(&path))
                .map_err(mlua::Error::external)?;
            lua.create_string(bytes)
        })?,
    )?;

    let run_process_sdk = sdk.clone();
    table.set(
        "run_process",
        lua.create_function(move |_, argv: Variadic<String>| {
            let result = run_process_sdk.run_process(&argv, std::collections::HashMap::new(), None);
            Ok(result.success)
        })?,
    )?;

    lua.globals().set("sdk", table)?;

    lua.globals().set(
        "tool",
        lua.create_function(|_, (_id, _version): (String, Option<String>)| {
            Ok(MultiValue::new())
        })?,
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "lua_tests.rs"]
mod tests;
