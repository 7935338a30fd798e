//! 对象缓存
//!
//! 缓存后端以插件形式注册到全局注册表，启动时按配置的名称取用。
//! 目前提供 `moka`（进程内）与 `redis` 两种实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个对象缓存插件
///
/// 生成 `register()` 函数，将构造器以给定名称写入全局注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::PortalError::cache_connection)?;
                        let boxed: Box<dyn $crate::cache::ObjectCache> = Box::new(cache);
                        Ok::<_, $crate::errors::PortalError>(boxed)
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存插件（幂等）
pub fn register_builtin_plugins() {
    static REGISTERED: std::sync::Once = std::sync::Once::new();
    REGISTERED.call_once(|| {
        object_cache::moka::register();
        object_cache::redis::register();
    });
}
