//! 对象缓存层
//!
//! 通过 ctor 注册表提供可插拔的缓存后端（Moka 内存缓存 / Redis），
//! 启动时按配置选择，Redis 不可用时回退到内存缓存。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端插件
///
/// 被声明类型需要提供 `fn new() -> Result<Self, String>`；
/// 注册发生在进程启动阶段（ctor），运行期按名称查表构造。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ty) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_plugin_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let plugin = <$plugin>::new()
                                .map_err($crate::errors::ClassHubError::cache_connection)?;
                            Ok(Box::new(plugin) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
