// 戦略レジストリ - 識別子と呼び出し本体の順序付きリスト

use crate::core::{BenchError, BenchResult, Instance, StrategyKind};

/// 引数なしでインスタンスを生成する呼び出し本体
pub type Invoker = Box<dyn FnMut() -> BenchResult<Instance>>;

/// 登録済みの戦略
pub struct StrategyEntry {
    kind: StrategyKind,
    enabled: bool,
    invoker: Invoker,
}

impl StrategyEntry {
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn invoker_mut(&mut self) -> &mut Invoker {
        &mut self.invoker
    }

    /// 1回呼び出す
    pub fn invoke(&mut self) -> BenchResult<Instance> {
        (self.invoker)()
    }
}

impl std::fmt::Debug for StrategyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyEntry")
            .field("kind", &self.kind)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// 登録順を保持する戦略レジストリ
///
/// 無効化された戦略も登録順の位置を保ったまま残る。
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 戦略を末尾に登録
    pub fn register(
        &mut self,
        kind: StrategyKind,
        enabled: bool,
        invoker: Invoker,
    ) -> BenchResult<()> {
        if self.entries.iter().any(|entry| entry.kind == kind) {
            return Err(BenchError::duplicate_definition("strategy", kind.as_str()));
        }

        self.entries.push(StrategyEntry {
            kind,
            enabled,
            invoker,
        });
        Ok(())
    }

    /// 有効・無効を切り替える。未登録の場合は false を返す
    pub fn set_enabled(&mut self, kind: StrategyKind, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.kind == kind) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, kind: StrategyKind) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.kind == kind && entry.enabled)
    }

    /// 有効な戦略の識別子（登録順）
    pub fn active_kinds(&self) -> Vec<StrategyKind> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.kind)
            .collect()
    }

    /// 有効な戦略を登録順に走査
    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut StrategyEntry> {
        self.entries.iter_mut().filter(|entry| entry.enabled)
    }

    pub fn get_mut(&mut self, kind: StrategyKind) -> Option<&mut StrategyEntry> {
        self.entries.iter_mut().find(|entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::invokers;

    fn registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        registry
            .register(StrategyKind::Zero, true, invokers::zero_level())
            .unwrap();
        registry
            .register(StrategyKind::CompileMethod, false, invokers::zero_level())
            .unwrap();
        registry
            .register(StrategyKind::Lambda, true, invokers::zero_level())
            .unwrap();
        registry
    }

    #[test]
    fn test_active_kinds_skip_disabled() {
        let registry = registry();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.active_kinds(),
            vec![StrategyKind::Zero, StrategyKind::Lambda]
        );
    }

    #[test]
    fn test_enabling_keeps_registration_position() {
        let mut registry = registry();

        assert!(registry.set_enabled(StrategyKind::CompileMethod, true));
        assert_eq!(
            registry.active_kinds(),
            vec![
                StrategyKind::Zero,
                StrategyKind::CompileMethod,
                StrategyKind::Lambda
            ]
        );
        assert!(!registry.set_enabled(StrategyKind::Reflection, true));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = registry();

        let error = registry
            .register(StrategyKind::Zero, true, invokers::zero_level())
            .unwrap_err();
        assert!(error.to_string().contains("Zero"));
    }

    #[test]
    fn test_invoke_entry() {
        let mut registry = registry();
        let entry = registry.get_mut(StrategyKind::Lambda).unwrap();

        assert_eq!(entry.kind(), StrategyKind::Lambda);
        assert!(entry.invoke().is_ok());
        assert!(registry.get_mut(StrategyKind::Compile).is_none());
    }

    #[test]
    fn test_active_mut_iterates_enabled_only() {
        let mut registry = registry();
        let visited: Vec<_> = registry.active_mut().map(|entry| entry.kind()).collect();

        assert_eq!(visited, vec![StrategyKind::Zero, StrategyKind::Lambda]);
        assert!(!registry.is_empty());
    }
}
