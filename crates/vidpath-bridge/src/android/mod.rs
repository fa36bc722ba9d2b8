// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform glue via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Packaged assets are read through
// `Context.getAssets().open(path)`; the returned `java.io.InputStream` is
// wrapped in a `std::io::Read` adapter that closes the stream on drop.
//
// The hosting activity does not install a channel handler unless the
// `asset-cache` feature is enabled; see `crate::platform_handler`.

#![cfg(target_os = "android")]

use std::io::{self, Read};
use std::path::PathBuf;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::sys::jsize;
use jni::{JNIEnv, JavaVM};
use tracing::{debug, warn};

use vidpath_core::error::{Result, VidpathError};

use crate::traits::AssetSource;

/// Largest chunk pulled across JNI per `read` call.
const READ_CHUNK: usize = 64 * 1024;

/// Convenience: map any `jni::errors::Error` into `VidpathError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> VidpathError {
    VidpathError::Bridge(format!("{context}: {e}"))
}

/// Clear a pending Java exception so the next JNI call is legal.
fn clear_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}

/// Handle on the JVM and the hosting Android `Context`.
///
/// Built once from the NDK context; the context object is pinned with a
/// global reference so it can be used from any attached thread.
pub struct AndroidContext {
    vm: JavaVM,
    context: GlobalRef,
}

impl AndroidContext {
    /// Capture the `JavaVM*` and `Context` published by the NDK glue.
    pub fn from_ndk() -> Result<Self> {
        let ctx = ndk_context::android_context();
        if ctx.context().is_null() {
            return Err(VidpathError::Bridge(
                "Android context is null — activity not initialised".into(),
            ));
        }

        // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
        // The pointer is valid for the lifetime of the process.
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
            .map_err(|e| jni_err("JavaVM::from_raw", e))?;

        let context = {
            let env = vm
                .attach_current_thread()
                .map_err(|e| jni_err("attach_current_thread", e))?;
            // SAFETY: the NDK guarantees this is a valid global jobject for
            // the hosting Context.
            let obj = unsafe { JObject::from_raw(ctx.context().cast()) };
            env.new_global_ref(obj)
                .map_err(|e| jni_err("new_global_ref(context)", e))?
        };

        Ok(Self { vm, context })
    }

    fn env(&self) -> Result<JNIEnv<'_>> {
        self.vm
            .attach_current_thread_permanently()
            .map_err(|e| jni_err("attach_current_thread_permanently", e))
    }

    /// Absolute path of `Context.getCacheDir()`.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let mut env = self.env()?;

        let dir = env
            .call_method(self.context.as_obj(), "getCacheDir", "()Ljava/io/File;", &[])
            .map_err(|e| jni_err("getCacheDir", e))?
            .l()
            .map_err(|e| jni_err("getCacheDir->l", e))?;
        let path: JString = env
            .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .map_err(|e| jni_err("getAbsolutePath", e))?
            .l()
            .map_err(|e| jni_err("getAbsolutePath->l", e))?
            .into();
        let path: String = env
            .get_string(&path)
            .map_err(|e| jni_err("get_string(cacheDir)", e))?
            .into();

        debug!(%path, "resolved Android cache directory");
        Ok(PathBuf::from(path))
    }
}

impl AssetSource for AndroidContext {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        let mut env = self.env()?;

        let assets = env
            .call_method(
                self.context.as_obj(),
                "getAssets",
                "()Landroid/content/res/AssetManager;",
                &[],
            )
            .map_err(|e| jni_err("getAssets", e))?
            .l()
            .map_err(|e| jni_err("getAssets->l", e))?;
        let j_path = env
            .new_string(path)
            .map_err(|e| jni_err("new_string(path)", e))?;

        // AssetManager.open throws FileNotFoundException for missing assets.
        let stream = match env.call_method(
            &assets,
            "open",
            "(Ljava/lang/String;)Ljava/io/InputStream;",
            &[JValue::Object(&j_path)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err("AssetManager.open->l", e))?,
            Err(e) => {
                clear_exception(&mut env);
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("asset {path}: {e}"),
                )
                .into());
            }
        };

        let stream = env
            .new_global_ref(stream)
            .map_err(|e| jni_err("new_global_ref(stream)", e))?;
        Ok(Box::new(AssetStream { owner: self, stream }))
    }
}

/// `java.io.InputStream` exposed as `std::io::Read`.
struct AssetStream<'a> {
    owner: &'a AndroidContext,
    stream: GlobalRef,
}

impl Read for AssetStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut env = self.owner.env().map_err(io::Error::other)?;
        let want = buf.len().min(READ_CHUNK);

        let chunk = env
            .new_byte_array(want as jsize)
            .map_err(|e| io::Error::other(jni_err("new_byte_array", e)))?;
        let read = env
            .call_method(self.stream.as_obj(), "read", "([B)I", &[JValue::Object(&chunk)])
            .and_then(|v| v.i());
        let read = match read {
            Ok(n) => n,
            Err(e) => {
                clear_exception(&mut env);
                let _ = env.delete_local_ref(chunk);
                return Err(io::Error::other(jni_err("InputStream.read", e)));
            }
        };

        // -1 marks end of stream.
        if read <= 0 {
            let _ = env.delete_local_ref(chunk);
            return Ok(0);
        }

        let n = read as usize;
        let mut signed = vec![0i8; n];
        let copied = env.get_byte_array_region(&chunk, 0, &mut signed);
        let _ = env.delete_local_ref(chunk);
        copied.map_err(|e| io::Error::other(jni_err("get_byte_array_region", e)))?;

        for (dst, src) in buf[..n].iter_mut().zip(signed) {
            *dst = src as u8;
        }
        Ok(n)
    }
}

impl Drop for AssetStream<'_> {
    fn drop(&mut self) {
        let Ok(mut env) = self.owner.env() else {
            warn!("could not attach to JVM to close asset stream");
            return;
        };
        if env.call_method(self.stream.as_obj(), "close", "()V", &[]).is_err() {
            clear_exception(&mut env);
            warn!("InputStream.close failed");
        }
    }
}
