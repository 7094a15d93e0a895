use async_trait::async_trait;

/// 缓存查询结果
///
/// `ExistsButNoValue` 表示后端暂时取不到值（连接故障等），
/// 调用方应当按缓存未命中处理而不是报错。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 字符串对象缓存后端
///
/// 所有操作都是尽力而为：写入与删除失败只记日志，不向上传播。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 读取原始字符串值
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入原始字符串值；ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    /// 删除单个键
    async fn remove(&self, key: &str);

    /// 清空全部缓存
    async fn invalidate_all(&self);
}
