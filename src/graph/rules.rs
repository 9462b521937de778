//! Relationship rule table
//!
//! Declarative mapping from resource kind to display category and the
//! synthetic child nodes its kind implies. To teach the builder a new
//! relationship, add an entry to `KIND_RULES` below; the traversal code
//! never changes.

/// Display category, mapped to an icon class for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cluster,
    Workload,
    Batch,
    Network,
    Config,
    Rbac,
    Storage,
    Autoscaling,
    Scheduling,
    Custom,
    /// Fallback for kinds without a rule entry.
    Generic,
}

impl Category {
    pub fn icon_class(&self) -> &'static str {
        match self {
            Category::Cluster => "icon-namespace",
            Category::Workload => "icon-workload",
            Category::Batch => "icon-batch",
            Category::Network => "icon-network",
            Category::Config => "icon-config",
            Category::Rbac => "icon-rbac",
            Category::Storage => "icon-storage",
            Category::Autoscaling => "icon-autoscaling",
            Category::Scheduling => "icon-scheduling",
            Category::Custom => "icon-crd",
            Category::Generic => "icon-resource",
        }
    }
}

/// One synthetic child implied by a parent kind.
///
/// `suffix` extends the parent id; `children` nests further expansion
/// (e.g. ClusterRoleBinding -> ClusterRole -> subjects).
pub struct ChildSpec {
    pub suffix: &'static str,
    pub kind: &'static str,
    pub children: &'static [ChildSpec],
}

/// Rule table entry for one kind.
pub struct KindRule {
    pub kind: &'static str,
    pub category: Category,
    pub children: &'static [ChildSpec],
}

/// RBAC subject fan-out shared by both binding kinds.
const ROLE_SUBJECTS: &[ChildSpec] = &[
    ChildSpec {
        suffix: "user",
        kind: "User",
        children: &[],
    },
    ChildSpec {
        suffix: "serviceaccount",
        kind: "ServiceAccount",
        children: &[],
    },
    ChildSpec {
        suffix: "group",
        kind: "Group",
        children: &[],
    },
];

/// Relationship rules for every supported kind.
///
/// Kinds with an empty `children` slice still matter: they pin the
/// category (and so the icon) instead of falling back to generic.
pub const KIND_RULES: &[KindRule] = &[
    // Workloads
    KindRule {
        kind: "Deployment",
        category: Category::Workload,
        children: &[ChildSpec {
            suffix: "replicaset",
            kind: "ReplicaSet",
            children: &[],
        }],
    },
    KindRule {
        kind: "ReplicaSet",
        category: Category::Workload,
        children: &[],
    },
    KindRule {
        kind: "StatefulSet",
        category: Category::Workload,
        children: &[],
    },
    KindRule {
        kind: "DaemonSet",
        category: Category::Workload,
        children: &[],
    },
    KindRule {
        kind: "Pod",
        category: Category::Workload,
        children: &[],
    },
    // Batch
    KindRule {
        kind: "CronJob",
        category: Category::Batch,
        children: &[ChildSpec {
            suffix: "job",
            kind: "Job",
            children: &[],
        }],
    },
    KindRule {
        kind: "Job",
        category: Category::Batch,
        children: &[],
    },
    // Services / networking
    KindRule {
        kind: "Service",
        category: Category::Network,
        children: &[ChildSpec {
            suffix: "endpoints",
            kind: "Endpoints",
            children: &[],
        }],
    },
    KindRule {
        kind: "Endpoints",
        category: Category::Network,
        children: &[],
    },
    KindRule {
        kind: "EndpointSlice",
        category: Category::Network,
        children: &[],
    },
    KindRule {
        kind: "Ingress",
        category: Category::Network,
        children: &[],
    },
    KindRule {
        kind: "NetworkPolicy",
        category: Category::Network,
        children: &[],
    },
    // Config
    KindRule {
        kind: "ConfigMap",
        category: Category::Config,
        children: &[],
    },
    KindRule {
        kind: "Secret",
        category: Category::Config,
        children: &[],
    },
    // RBAC
    KindRule {
        kind: "ServiceAccount",
        category: Category::Rbac,
        children: &[],
    },
    KindRule {
        kind: "Role",
        category: Category::Rbac,
        children: &[],
    },
    KindRule {
        kind: "RoleBinding",
        category: Category::Rbac,
        children: &[ChildSpec {
            suffix: "role",
            kind: "Role",
            children: ROLE_SUBJECTS,
        }],
    },
    KindRule {
        kind: "ClusterRole",
        category: Category::Rbac,
        children: &[],
    },
    KindRule {
        kind: "ClusterRoleBinding",
        category: Category::Rbac,
        children: &[ChildSpec {
            suffix: "clusterrole",
            kind: "ClusterRole",
            children: ROLE_SUBJECTS,
        }],
    },
    // Storage
    KindRule {
        kind: "PersistentVolumeClaim",
        category: Category::Storage,
        children: &[ChildSpec {
            suffix: "persistentvolume",
            kind: "PersistentVolume",
            children: &[],
        }],
    },
    KindRule {
        kind: "PersistentVolume",
        category: Category::Storage,
        children: &[],
    },
    KindRule {
        kind: "StorageClass",
        category: Category::Storage,
        children: &[],
    },
    // Autoscaling / scheduling
    KindRule {
        kind: "HorizontalPodAutoscaler",
        category: Category::Autoscaling,
        children: &[],
    },
    KindRule {
        kind: "PriorityClass",
        category: Category::Scheduling,
        children: &[],
    },
    // CRDs
    KindRule {
        kind: "CustomResourceDefinition",
        category: Category::Custom,
        children: &[],
    },
];

/// Look up the rule for a kind. Lookup is case-insensitive so the feed
/// may carry either the canonical tag or a lowercased variant.
pub fn rule_for(kind: &str) -> Option<&'static KindRule> {
    KIND_RULES.iter().find(|rule| rule.kind.eq_ignore_ascii_case(kind))
}

/// Category for a kind, falling back to generic for unknown kinds.
pub fn category_for(kind: &str) -> Category {
    rule_for(kind).map(|rule| rule.category).unwrap_or(Category::Generic)
}

/// Synthetic children implied by a kind; empty for unknown kinds.
pub fn children_for(kind: &str) -> &'static [ChildSpec] {
    rule_for(kind).map(|rule| rule.children).unwrap_or(&[])
}
